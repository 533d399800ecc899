mod common;

use common::run_source;

#[test]
fn test_countdown_loop_accumulates_sum() {
    // 5 + 4 + 3 + 2 + 1 = 15
    let run = run_source(
        r#"
.data
n: .word 5
.text
lw $t0, n
li $t1, 0
loop:
add $t1, $t1, $t0
addi $t0, $t0, -1
bgtz $t0, loop
move $a0, $t1
li $v0, 1
syscall
li $v0, 10
syscall
"#,
    );

    run.assert_clean();
    assert_eq!(run.output, ["15"]);
}

#[test]
fn test_function_call_returns_to_call_site() {
    let run = run_source(
        r#"
.data
.text
li $t0, 21
jal double
move $a0, $t0
li $v0, 1
syscall
li $v0, 10
syscall
double:
add $t0, $t0, $t0
jr $ra
"#,
    );

    run.assert_clean();
    assert_eq!(run.output, ["42"]);
}

#[test]
fn test_branch_selects_the_larger_value() {
    let run = run_source(
        r#"
.data
a: .word 12
b: .word 31
.text
lw $t0, a
lw $t1, b
slt $t2, $t0, $t1
bne $t2, $zero, second
move $a0, $t0
j report
second:
move $a0, $t1
report:
li $v0, 1
syscall
li $v0, 10
syscall
"#,
    );

    run.assert_clean();
    assert_eq!(run.output, ["31"]);
}

#[test]
fn test_load_linked_store_conditional_updates_memory() {
    let run = run_source(
        r#"
.data
shared: .word 10
.text
ll $t0, shared
addi $t0, $t0, 1
sc $t0, shared
move $a0, $t0
li $v0, 1
syscall
lw $a0, shared
li $v0, 1
syscall
"#,
    );

    run.assert_clean();
    // sc reports success, then the stored value is visible.
    assert_eq!(run.output, ["1", "11"]);
}

#[test]
fn test_store_conditional_without_link_fails() {
    let run = run_source(
        r#"
.data
shared: .word 10
.text
li $t0, 99
sc $t0, shared
move $a0, $t0
li $v0, 1
syscall
lw $a0, shared
li $v0, 1
syscall
"#,
    );

    run.assert_clean();
    assert_eq!(run.output, ["0", "10"]);
}

#[test]
fn test_eret_resumes_after_the_break_site() {
    let run = run_source(
        r#"
.data
.text
li $t1, 0
break
bne $t1, $zero, done
li $t1, 1
eret
done:
move $a0, $t1
li $v0, 1
syscall
li $v0, 10
syscall
"#,
    );

    // break records $epc; eret lands back on the bne, which now exits.
    run.assert_clean();
    assert_eq!(run.output, ["1"]);
}

#[test]
fn test_jump_over_straight_line_code() {
    let run = run_source(
        r#"
.data
.text
j end
li $a0, 1
li $v0, 1
syscall
end:
li $v0, 10
syscall
"#,
    );

    run.assert_clean();
    assert!(run.output.is_empty());
}
