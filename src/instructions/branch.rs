//! Conditional branches. A taken branch hands its label to the engine,
//! which transfers control after the instruction completes.

use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::{expect_int_register, expect_operand_count, reg};

pub struct Beq;

impl InstructionHandler for Beq {
    fn name(&self) -> &'static str {
        "beq"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[0]);
        let rhs = evaluator.register_value(&operands[1]);
        if lhs == rhs {
            evaluator.jump_to_label(operands[2].value());
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("beq", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}

pub struct Bne;

impl InstructionHandler for Bne {
    fn name(&self) -> &'static str {
        "bne"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[0]);
        let rhs = evaluator.register_value(&operands[1]);
        if lhs != rhs {
            evaluator.jump_to_label(operands[2].value());
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("bne", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}

macro_rules! compare_to_zero_branch {
    ($handler:ident, $mnemonic:literal, $cond:expr) => {
        pub struct $handler;

        impl InstructionHandler for $handler {
            fn name(&self) -> &'static str {
                $mnemonic
            }

            fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
                if !self.check_operands(operands, evaluator) {
                    return;
                }

                let value = evaluator.register_value(&operands[0]);
                let taken: fn(i32) -> bool = $cond;
                if taken(value) {
                    evaluator.jump_to_label(operands[1].value());
                }
            }

            fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
                expect_operand_count($mnemonic, operands, 2, evaluator)
                    && expect_int_register(&operands[0], evaluator)
            }
        }
    };
}

compare_to_zero_branch!(Bgez, "bgez", |v| v >= 0);
compare_to_zero_branch!(Bgtz, "bgtz", |v| v > 0);
compare_to_zero_branch!(Blez, "blez", |v| v <= 0);
compare_to_zero_branch!(Bltz, "bltz", |v| v < 0);

pub struct Bltzal;

impl InstructionHandler for Bltzal {
    fn name(&self) -> &'static str {
        "bltzal"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.register_value(&operands[0]);
        if value < 0 {
            let return_address = evaluator.return_address();
            evaluator.set_register_value(&reg("$ra"), return_address);
            evaluator.jump_to_label(operands[1].value());
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("bltzal", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Instruction;
    use crate::instructions::support::harness::{evaluator, int_reg, run, set_int_reg};
    use crate::instructions::InstructionSet;

    #[test]
    fn test_branch_requires_known_label() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t1", 1);
        set_int_reg(&mut ev, "$t2", 1);

        run(&Beq, &["$t1", "$t2", "nowhere"], &mut ev);
        assert_eq!(ev.diagnostics().errors(), &["Label not found: nowhere"]);
    }

    #[test]
    fn test_not_taken_branch_reports_nothing() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t1", 1);

        run(&Bltz, &["$t1", "nowhere"], &mut ev);
        assert!(!ev.diagnostics().has_errors());
    }

    #[test]
    fn test_countdown_loop_terminates() {
        // li $t0, 3 ; loop: addi $t0, $t0, -1 ; bgtz $t0, loop
        let program = vec![
            Instruction::new("li", vec![Operand::new("$t0"), Operand::new("3")]),
            Instruction::new("loop:", vec![]),
            Instruction::new(
                "addi",
                vec![Operand::new("$t0"), Operand::new("$t0"), Operand::new("-1")],
            ),
            Instruction::new("bgtz", vec![Operand::new("$t0"), Operand::new("loop")]),
        ];

        let (mut ev, _console) = evaluator();
        let status = ev.evaluate(&program, &InstructionSet::standard());
        assert!(status.is_success());
        assert_eq!(int_reg(&mut ev, "$t0"), 0);
        assert!(!ev.diagnostics().has_errors());
    }
}
