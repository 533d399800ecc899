mod common;

use common::{run_source, run_with_input};

#[test]
fn test_hello_world_program() {
    let run = run_source(
        r#"
.data
msg: .asciiz "Hello, World!"
.text
main:
li $v0, 4
la $a0, msg
syscall
li $v0, 10
syscall
"#,
    );

    run.assert_clean();
    assert!(run.status.is_success());
    assert_eq!(run.output, ["Hello, World!"]);
}

#[test]
fn test_arithmetic_program_prints_result() {
    // (40 + 2) * 3 = 126
    let run = run_source(
        r#"
.data
base: .word 40
.text
lw $t0, base
addi $t0, $t0, 2
li $t1, 3
mult $t0, $t1
mflo $a0
li $v0, 1
syscall
li $v0, 10
syscall
"#,
    );

    run.assert_clean();
    assert_eq!(run.output, ["126"]);
}

#[test]
fn test_overflow_is_reported_and_register_unchanged() {
    let run = run_source(
        r#"
.data
big: .word 2147483647
.text
lw $t0, big
li $t1, 1
add $t2, $t0, $t1
move $a0, $t2
li $v0, 1
syscall
"#,
    );

    assert_eq!(run.errors, ["add instruction arithmetic overflow detected."]);
    assert_eq!(run.output, ["0"]);
}

#[test]
fn test_exit2_syscall_sets_process_exit_code() {
    let run = run_source(
        r#"
.data
.text
li $a0, 3
li $v0, 17
syscall
li $v0, 1
syscall
"#,
    );

    run.assert_clean();
    assert_eq!(run.status.code, 3);
    // Nothing after the exit runs.
    assert!(run.output.is_empty());
}

#[test]
fn test_break_with_code_stops_the_program() {
    let run = run_source(
        r#"
.data
.text
break 2
li $v0, 1
li $a0, 99
syscall
"#,
    );

    assert_eq!(run.status.code, 2);
    assert!(run.output.is_empty());
}

#[test]
fn test_unknown_instruction_is_diagnosed_and_skipped() {
    let run = run_source(
        r#"
.data
.text
frobnicate $t0, $t1
li $a0, 7
li $v0, 1
syscall
"#,
    );

    assert_eq!(run.errors, ["Instruction not supported: frobnicate"]);
    assert_eq!(run.output, ["7"]);
    assert!(run.status.is_success());
}

#[test]
fn test_read_and_echo_doubled_integer() {
    let run = run_with_input(
        r#"
.data
.text
li $v0, 5
syscall
move $t0, $v0
add $t0, $t0, $t0
move $a0, $t0
li $v0, 1
syscall
li $v0, 10
syscall
"#,
        &["21"],
    );

    run.assert_clean();
    assert_eq!(run.output, ["42"]);
}
