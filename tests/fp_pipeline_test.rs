mod common;

use common::run_source;

#[test]
fn test_double_arithmetic_prints_sum() {
    let run = run_source(
        r#"
.data
a: .double 1.5
b: .double 2.25
.text
ldc1 $f2, a
ldc1 $f4, b
add.d $f12, $f2, $f4
li $v0, 3
syscall
li $v0, 10
syscall
"#,
    );

    run.assert_clean();
    assert_eq!(run.output, ["3.75"]);
}

#[test]
fn test_single_precision_load_and_print() {
    let run = run_source(
        r#"
.data
x: .float 0.5
.text
lwc1 $f12, x
li $v0, 2
syscall
"#,
    );

    run.assert_clean();
    assert_eq!(run.output, ["0.5"]);
}

#[test]
fn test_compare_and_conditional_move() {
    let run = run_source(
        r#"
.data
x: .double 2.0
y: .double 3.0
.text
ldc1 $f2, x
ldc1 $f4, y
c.eq.d $f2, $f4
movf.d $f12, $f4
li $v0, 3
syscall
"#,
    );

    run.assert_clean();
    // The operands differ, so the condition flag stays clear and movf.d copies.
    assert_eq!(run.output, ["3"]);
}

#[test]
fn test_conversion_to_integer_register() {
    let run = run_source(
        r#"
.data
v: .double -2.7
.text
ldc1 $f2, v
floor.w.d $t0, $f2
move $a0, $t0
li $v0, 1
syscall
trunc.w.d $t0, $f2
move $a0, $t0
li $v0, 1
syscall
"#,
    );

    run.assert_clean();
    assert_eq!(run.output, ["-3", "-2"]);
}

#[test]
fn test_sqrt_of_negative_operand_is_diagnosed() {
    let run = run_source(
        r#"
.data
neg: .double -4.0
.text
ldc1 $f2, neg
sqrt.d $f4, $f2
"#,
    );

    assert_eq!(run.errors, ["sqrt.d instruction operand is negative."]);
}

#[test]
fn test_fp_division_by_zero_is_diagnosed() {
    let run = run_source(
        r#"
.data
one: .double 1.0
.text
ldc1 $f2, one
div.d $f0, $f2, $f4
"#,
    );

    assert_eq!(run.errors, ["div.d instruction division by zero."]);
}

#[test]
fn test_store_double_roundtrip() {
    let run = run_source(
        r#"
.data
src: .double 6.25
dst: .space 8
.text
ldc1 $f2, src
sdc1 $f2, dst
ldc1 $f12, dst
li $v0, 3
syscall
"#,
    );

    run.assert_clean();
    assert_eq!(run.output, ["6.25"]);
}
