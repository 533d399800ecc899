//! Trap instructions: when the condition holds, a trap diagnostic is
//! recorded and execution continues.

use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::{expect_int_register, expect_operand_count, parse_immediate};

pub struct Teqi;

impl InstructionHandler for Teqi {
    fn name(&self) -> &'static str {
        "teqi"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.register_value(&operands[0]);
        let Some(immediate) = parse_immediate("teqi", &operands[1], evaluator) else {
            return;
        };
        if value == immediate {
            evaluator
                .diagnostics_mut()
                .error("Trap exception: value equals immediate.");
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("teqi", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
    }
}

pub struct Tnei;

impl InstructionHandler for Tnei {
    fn name(&self) -> &'static str {
        "tnei"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.register_value(&operands[0]);
        let Some(immediate) = parse_immediate("tnei", &operands[1], evaluator) else {
            return;
        };
        if value != immediate {
            evaluator
                .diagnostics_mut()
                .error("Trap exception: value is not equal to immediate.");
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("tnei", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
    }
}

pub struct Tne;

impl InstructionHandler for Tne {
    fn name(&self) -> &'static str {
        "tne"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.register_value(&operands[0]);
        let rhs = evaluator.register_value(&operands[1]);
        if lhs != rhs {
            evaluator
                .diagnostics_mut()
                .error("Trap exception: values are not equal.");
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("tne", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
            && expect_int_register(&operands[1], evaluator)
    }
}

pub struct Tgeiu;

impl InstructionHandler for Tgeiu {
    fn name(&self) -> &'static str {
        "tgeiu"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.register_value(&operands[0]) as u32;
        let Some(immediate) = parse_immediate("tgeiu", &operands[1], evaluator) else {
            return;
        };
        if value >= immediate as u32 {
            evaluator
                .diagnostics_mut()
                .error("Trap exception: unsigned value is greater than or equal to immediate.");
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("tgeiu", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::support::harness::{evaluator, run, set_int_reg};

    #[test]
    fn test_trap_fires_only_when_condition_holds() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t0", 5);

        run(&Teqi, &["$t0", "4"], &mut ev);
        assert!(!ev.diagnostics().has_errors());

        run(&Teqi, &["$t0", "5"], &mut ev);
        assert!(ev.diagnostics().errors()[0].contains("Trap exception"));
    }

    #[test]
    fn test_unsigned_trap_comparison() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t0", -1); // unsigned max

        run(&Tgeiu, &["$t0", "100"], &mut ev);
        assert!(ev.diagnostics().errors()[0].contains("unsigned"));
    }

    #[test]
    fn test_tne_register_form() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t0", 1);
        set_int_reg(&mut ev, "$t1", 1);

        run(&Tne, &["$t0", "$t1"], &mut ev);
        assert!(!ev.diagnostics().has_errors());

        set_int_reg(&mut ev, "$t1", 2);
        run(&Tne, &["$t0", "$t1"], &mut ev);
        assert!(ev.diagnostics().has_errors());
    }
}
