//! Multiplication and division target the `$hi`/`$lo` pair, as on the real
//! machine: products are 64-bit, division leaves the quotient in `$lo` and
//! the remainder in `$hi`.

use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::{expect_int_register, expect_operand_count, reg};

fn write_hi_lo(evaluator: &mut Evaluator, product: i64) {
    evaluator.set_register_value(&reg("$lo"), (product & 0xFFFF_FFFF) as i32);
    evaluator.set_register_value(&reg("$hi"), (product >> 32) as i32);
}

pub struct Mult;

impl InstructionHandler for Mult {
    fn name(&self) -> &'static str {
        "mult"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[0]) as i64;
        let rhs = evaluator.register_value(&operands[1]) as i64;
        write_hi_lo(evaluator, lhs * rhs);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("mult", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}

pub struct Multu;

impl InstructionHandler for Multu {
    fn name(&self) -> &'static str {
        "multu"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[0]) as u32 as i64;
        let rhs = evaluator.register_value(&operands[1]) as u32 as i64;
        write_hi_lo(evaluator, lhs * rhs);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("multu", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}

pub struct Div;

impl InstructionHandler for Div {
    fn name(&self) -> &'static str {
        "div"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[0]);
        let rhs = evaluator.register_value(&operands[1]);
        if rhs == 0 {
            evaluator
                .diagnostics_mut()
                .error("div instruction division by zero.");
            return;
        }

        evaluator.set_register_value(&reg("$lo"), lhs.wrapping_div(rhs));
        evaluator.set_register_value(&reg("$hi"), lhs.wrapping_rem(rhs));
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("div", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}

pub struct Divu;

impl InstructionHandler for Divu {
    fn name(&self) -> &'static str {
        "divu"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[0]) as u32;
        let rhs = evaluator.register_value(&operands[1]) as u32;
        if rhs == 0 {
            evaluator
                .diagnostics_mut()
                .error("divu instruction division by zero.");
            return;
        }

        evaluator.set_register_value(&reg("$lo"), (lhs / rhs) as i32);
        evaluator.set_register_value(&reg("$hi"), (lhs % rhs) as i32);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("divu", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}
