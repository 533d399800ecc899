use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::{
    expect_immediate_range, expect_int_register, expect_operand_count, parse_immediate,
};

fn shift_amount(name: &str, operands: &[Operand], evaluator: &mut Evaluator) -> Option<u32> {
    let amount = parse_immediate(name, &operands[2], evaluator)?;
    if !expect_immediate_range(amount, 0, 31, evaluator) {
        return None;
    }
    Some(amount as u32)
}

pub struct Sll;

impl InstructionHandler for Sll {
    fn name(&self) -> &'static str {
        "sll"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.register_value(&operands[1]);
        let Some(amount) = shift_amount("sll", operands, evaluator) else {
            return;
        };
        evaluator.set_register_value(&operands[0], ((value as u32) << amount) as i32);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("sll", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}

pub struct Srl;

impl InstructionHandler for Srl {
    fn name(&self) -> &'static str {
        "srl"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.register_value(&operands[1]);
        let Some(amount) = shift_amount("srl", operands, evaluator) else {
            return;
        };
        evaluator.set_register_value(&operands[0], ((value as u32) >> amount) as i32);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("srl", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}

pub struct Sra;

impl InstructionHandler for Sra {
    fn name(&self) -> &'static str {
        "sra"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.register_value(&operands[1]);
        let Some(amount) = shift_amount("sra", operands, evaluator) else {
            return;
        };
        evaluator.set_register_value(&operands[0], value >> amount);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("sra", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::support::harness::{evaluator, int_reg, run, set_int_reg};

    #[test]
    fn test_shift_semantics() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t1", -8);

        run(&Sra, &["$t0", "$t1", "2"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t0"), -2);

        run(&Srl, &["$t0", "$t1", "2"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t0"), (-8i32 as u32 >> 2) as i32);

        run(&Sll, &["$t0", "$t1", "1"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t0"), -16);
    }

    #[test]
    fn test_shift_amount_range() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t1", 1);

        run(&Sll, &["$t0", "$t1", "32"], &mut ev);
        assert!(ev.diagnostics().errors()[0].contains("between 0 and 31"));
        assert_eq!(int_reg(&mut ev, "$t0"), 0);
    }
}
