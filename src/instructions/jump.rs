//! Unconditional jumps and calls. `jal` records the index of the following
//! instruction in `$ra`; `jr`/`jalr` resume exactly at the register value.

use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::{expect_int_register, expect_operand_count, reg};

pub struct J;

impl InstructionHandler for J {
    fn name(&self) -> &'static str {
        "j"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        evaluator.jump_to_label(operands[0].value());
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("j", operands, 1, evaluator)
    }
}

pub struct Jal;

impl InstructionHandler for Jal {
    fn name(&self) -> &'static str {
        "jal"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let return_address = evaluator.return_address();
        evaluator.set_register_value(&reg("$ra"), return_address);
        evaluator.jump_to_label(operands[0].value());
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("jal", operands, 1, evaluator)
    }
}

pub struct Jr;

impl InstructionHandler for Jr {
    fn name(&self) -> &'static str {
        "jr"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        evaluator.jump_to_register(&operands[0]);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("jr", operands, 1, evaluator)
            && expect_int_register(&operands[0], evaluator)
    }
}

pub struct Jalr;

impl InstructionHandler for Jalr {
    fn name(&self) -> &'static str {
        "jalr"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let return_address = evaluator.return_address();
        evaluator.set_register_value(&reg("$ra"), return_address);
        evaluator.jump_to_register(&operands[0]);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("jalr", operands, 1, evaluator)
            && expect_int_register(&operands[0], evaluator)
    }
}
