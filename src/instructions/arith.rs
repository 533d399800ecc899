//! Integer arithmetic. `add`/`addi` detect signed overflow and report it as
//! a diagnostic instead of writing a wrapped result; `addiu` wraps.

use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::{expect_int_register, expect_operand_count, parse_immediate};

pub struct Add;

impl InstructionHandler for Add {
    fn name(&self) -> &'static str {
        "add"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[1]);
        let rhs = evaluator.register_value(&operands[2]);
        match lhs.checked_add(rhs) {
            Some(sum) => evaluator.set_register_value(&operands[0], sum),
            None => evaluator
                .diagnostics_mut()
                .error("add instruction arithmetic overflow detected."),
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("add", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
            && expect_int_register(&operands[2], evaluator)
    }
}

pub struct Addi;

impl InstructionHandler for Addi {
    fn name(&self) -> &'static str {
        "addi"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[1]);
        let Some(immediate) = parse_immediate("addi", &operands[2], evaluator) else {
            return;
        };
        match lhs.checked_add(immediate) {
            Some(sum) => evaluator.set_register_value(&operands[0], sum),
            None => evaluator
                .diagnostics_mut()
                .error("addi instruction arithmetic overflow detected."),
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("addi", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}

pub struct Addiu;

impl InstructionHandler for Addiu {
    fn name(&self) -> &'static str {
        "addiu"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[1]);
        let Some(immediate) = parse_immediate("addiu", &operands[2], evaluator) else {
            return;
        };
        evaluator.set_register_value(&operands[0], lhs.wrapping_add(immediate));
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("addiu", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}

pub struct Sub;

impl InstructionHandler for Sub {
    fn name(&self) -> &'static str {
        "sub"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[1]);
        let rhs = evaluator.register_value(&operands[2]);
        match lhs.checked_sub(rhs) {
            Some(difference) => evaluator.set_register_value(&operands[0], difference),
            None => evaluator
                .diagnostics_mut()
                .error("sub instruction arithmetic overflow detected."),
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("sub", operands, 3, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
            && expect_int_register(&operands[2], evaluator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::support::harness::{evaluator, int_reg, run, set_int_reg};

    #[test]
    fn test_add_and_sub() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t1", 40);
        set_int_reg(&mut ev, "$t2", 2);

        run(&Add, &["$t0", "$t1", "$t2"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t0"), 42);

        run(&Sub, &["$t3", "$t1", "$t2"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t3"), 38);
        assert!(!ev.diagnostics().has_errors());
    }

    #[test]
    fn test_add_overflow_is_reported_not_written() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t1", i32::MAX);
        set_int_reg(&mut ev, "$t2", 1);

        run(&Add, &["$t0", "$t1", "$t2"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t0"), 0);
        assert!(ev.diagnostics().errors()[0].contains("overflow"));
    }

    #[test]
    fn test_addi_parses_immediate() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t1", 5);

        run(&Addi, &["$t0", "$t1", "-3"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t0"), 2);

        run(&Addi, &["$t0", "$t1", "many"], &mut ev);
        assert!(ev.diagnostics().errors()[0].contains("immediate"));
    }

    #[test]
    fn test_addiu_wraps() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t1", i32::MAX);

        run(&Addiu, &["$t0", "$t1", "1"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t0"), i32::MIN);
        assert!(!ev.diagnostics().has_errors());
    }

    #[test]
    fn test_wrong_operand_count() {
        let (mut ev, _console) = evaluator();
        run(&Add, &["$t0", "$t1"], &mut ev);
        assert!(ev.diagnostics().errors()[0].contains("exactly 3 operand(s)"));
    }
}
