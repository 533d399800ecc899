use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::{expect_int_register, expect_operand_count, parse_immediate};

pub struct Slt;

impl InstructionHandler for Slt {
    fn name(&self) -> &'static str {
        "slt"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[1]);
        let rhs = evaluator.register_value(&operands[2]);
        evaluator.set_register_value(&operands[0], (lhs < rhs) as i32);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("slt", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
            && expect_int_register(&operands[2], evaluator)
    }
}

pub struct Slti;

impl InstructionHandler for Slti {
    fn name(&self) -> &'static str {
        "slti"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[1]);
        let Some(immediate) = parse_immediate("slti", &operands[2], evaluator) else {
            return;
        };
        evaluator.set_register_value(&operands[0], (lhs < immediate) as i32);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("slti", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}

pub struct Sltu;

impl InstructionHandler for Sltu {
    fn name(&self) -> &'static str {
        "sltu"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[1]) as u32;
        let rhs = evaluator.register_value(&operands[2]) as u32;
        evaluator.set_register_value(&operands[0], (lhs < rhs) as i32);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("sltu", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
            && expect_int_register(&operands[2], evaluator)
    }
}

pub struct Sltiu;

impl InstructionHandler for Sltiu {
    fn name(&self) -> &'static str {
        "sltiu"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[1]) as u32;
        let Some(immediate) = parse_immediate("sltiu", &operands[2], evaluator) else {
            return;
        };
        evaluator.set_register_value(&operands[0], (lhs < immediate as u32) as i32);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("sltiu", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::support::harness::{evaluator, int_reg, run, set_int_reg};

    #[test]
    fn test_signed_vs_unsigned_comparison() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t1", -1);
        set_int_reg(&mut ev, "$t2", 1);

        run(&Slt, &["$t0", "$t1", "$t2"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t0"), 1);

        // As unsigned, -1 is the largest value.
        run(&Sltu, &["$t0", "$t1", "$t2"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t0"), 0);
    }

    #[test]
    fn test_immediate_comparisons() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t1", 5);

        run(&Slti, &["$t0", "$t1", "6"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t0"), 1);

        run(&Sltiu, &["$t0", "$t1", "-1"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t0"), 1);
    }
}
