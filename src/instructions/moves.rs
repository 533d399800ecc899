use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::{
    expect_fp_register, expect_int_register, expect_operand_count, reg,
};

pub struct Move;

impl InstructionHandler for Move {
    fn name(&self) -> &'static str {
        "move"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.register_value(&operands[1]);
        evaluator.set_register_value(&operands[0], value);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("move", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}

pub struct Mfhi;

impl InstructionHandler for Mfhi {
    fn name(&self) -> &'static str {
        "mfhi"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.register_value(&reg("$hi"));
        evaluator.set_register_value(&operands[0], value);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("mfhi", operands, 1, evaluator)
            && expect_int_register(&operands[0], evaluator)
    }
}

pub struct Mflo;

impl InstructionHandler for Mflo {
    fn name(&self) -> &'static str {
        "mflo"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.register_value(&reg("$lo"));
        evaluator.set_register_value(&operands[0], value);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("mflo", operands, 1, evaluator)
            && expect_int_register(&operands[0], evaluator)
    }
}

pub struct Movz;

impl InstructionHandler for Movz {
    fn name(&self) -> &'static str {
        "movz"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let condition = evaluator.register_value(&operands[2]);
        if condition == 0 {
            let value = evaluator.register_value(&operands[1]);
            evaluator.set_register_value(&operands[0], value);
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("movz", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
            && expect_int_register(&operands[2], evaluator)
    }
}

pub struct Movn;

impl InstructionHandler for Movn {
    fn name(&self) -> &'static str {
        "movn"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let condition = evaluator.register_value(&operands[2]);
        if condition != 0 {
            let value = evaluator.register_value(&operands[1]);
            evaluator.set_register_value(&operands[0], value);
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("movn", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
            && expect_int_register(&operands[2], evaluator)
    }
}

/// `movf.d`: copy when the FP condition flag is clear.
pub struct MovfD;

impl InstructionHandler for MovfD {
    fn name(&self) -> &'static str {
        "movf.d"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        if !evaluator.fp_condition_flag() {
            let value = evaluator.fp_register_value(&operands[1]);
            evaluator.set_fp_register_value(&operands[0], value);
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("movf.d", operands, 2, evaluator)
            && expect_fp_register(&operands[0], evaluator)
            && expect_fp_register(&operands[1], evaluator)
    }
}
