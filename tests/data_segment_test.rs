mod common;

use common::run_source;

#[test]
fn test_layout_follows_declaration_order() {
    let run = run_source(
        r#"
.data
w: .word 258
b: .byte 7
h: .half -2
s: .asciiz "ab"
buf: .space 4
.text
la $a0, w
li $v0, 1
syscall
la $a0, b
li $v0, 1
syscall
la $a0, h
li $v0, 1
syscall
la $a0, s
li $v0, 1
syscall
la $a0, buf
li $v0, 1
syscall
"#,
    );

    run.assert_clean();
    // word(4) + byte(1) + half(2) + "ab\0"(3) + space(4)
    assert_eq!(run.output, ["0", "4", "5", "7", "10"]);
}

#[test]
fn test_typed_loads_see_declared_values() {
    let run = run_source(
        r#"
.data
w: .word 258
b: .byte 7
h: .half -2
.text
lw $a0, w
li $v0, 1
syscall
lb $a0, b
li $v0, 1
syscall
lh $a0, h
li $v0, 1
syscall
"#,
    );

    run.assert_clean();
    assert_eq!(run.output, ["258", "7", "-2"]);
}

#[test]
fn test_store_then_load_through_displacement() {
    let run = run_source(
        r#"
.data
buf: .space 8
.text
la $t0, buf
li $t1, 77
sw $t1, 4($t0)
lw $a0, 4($t0)
li $v0, 1
syscall
"#,
    );

    run.assert_clean();
    assert_eq!(run.output, ["77"]);
}

#[test]
fn test_sbrk_bumps_past_the_data_segment() {
    let run = run_source(
        r#"
.data
x: .word 1
.text
li $v0, 9
li $a0, 10
syscall
move $a0, $v0
li $v0, 1
syscall
li $v0, 9
li $a0, 4
syscall
move $a0, $v0
li $v0, 1
syscall
"#,
    );

    run.assert_clean();
    // Data ends at 4; the second block starts at the word-aligned 16.
    assert_eq!(run.output, ["4", "16"]);
}

#[test]
fn test_sbrk_rejects_negative_size() {
    let run = run_source(
        r#"
.data
.text
li $v0, 9
li $a0, -8
syscall
move $a0, $v0
li $v0, 1
syscall
"#,
    );

    assert_eq!(run.errors, ["Invalid allocation size for sbrk: -8"]);
    assert_eq!(run.output, ["-1"]);
}

#[test]
fn test_out_of_bounds_store_is_refused() {
    let run = run_source(
        r#"
.data
x: .word 5
.text
li $t0, -64
li $t1, 1
sw $t1, ($t0)
lw $a0, x
li $v0, 1
syscall
"#,
    );

    assert_eq!(run.errors.len(), 1);
    assert!(run.errors[0].contains("out of bounds"));
    // The data segment is untouched.
    assert_eq!(run.output, ["5"]);
}

#[test]
fn test_unaligned_store_pair_writes_through() {
    let run = run_source(
        r#"
.data
buf: .space 8
.text
la $t0, buf
li $t1, 43981
swl $t1, 2($t0)
lw $a0, 0($t0)
li $v0, 1
syscall
"#,
    );

    run.assert_clean();
    // 0xABCD shifted into the high half of the word: 0xABCD0000.
    assert_eq!(run.output, [(0xABCD_0000u32 as i32).to_string()]);
}
