use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::reg;

pub struct Nop;

impl InstructionHandler for Nop {
    fn name(&self) -> &'static str {
        "nop"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        let _ = self.check_operands(operands, evaluator);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        if !operands.is_empty() {
            evaluator
                .diagnostics_mut()
                .error("nop instruction must have no operands.");
            return false;
        }
        true
    }
}

/// `break`: records the break exception in CP0 (`$cause` = 9, `$epc` = the
/// current position) and, when an error code operand is given, requests
/// program exit with that code.
pub struct Break;

impl InstructionHandler for Break {
    fn name(&self) -> &'static str {
        "break"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        evaluator.set_cp0_register_value(&reg("$cause"), 9);
        let pc = evaluator.current_pc() as i32;
        evaluator.set_cp0_register_value(&reg("$epc"), pc);

        if let Some(operand) = operands.first() {
            match operand.parse_int() {
                Some(code) => evaluator.request_exit(code),
                None => evaluator
                    .diagnostics_mut()
                    .error("break instruction error code must be an integer."),
            }
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        if operands.len() > 1 {
            evaluator
                .diagnostics_mut()
                .error("break instruction must have zero or one operand.");
            return false;
        }
        true
    }
}

/// `eret`: resume after the instruction recorded in `$epc`.
pub struct Eret;

impl InstructionHandler for Eret {
    fn name(&self) -> &'static str {
        "eret"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        evaluator.resume_from_epc();
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        if !operands.is_empty() {
            evaluator
                .diagnostics_mut()
                .error("eret instruction must have no operands.");
            return false;
        }
        true
    }
}
