use crate::core::engine::Evaluator;
use crate::domain::model::Operand;

/// Shorthand for the fixed registers handlers address directly ($v0, $a0,
/// $ra, $f12, ...).
pub(crate) fn reg(name: &str) -> Operand {
    Operand::new(name)
}

pub fn expect_operand_count(
    name: &str,
    operands: &[Operand],
    expected: usize,
    evaluator: &mut Evaluator,
) -> bool {
    if operands.len() != expected {
        evaluator.diagnostics_mut().error(format!(
            "{} instruction must have exactly {} operand(s), got {}.",
            name,
            expected,
            operands.len()
        ));
        return false;
    }
    true
}

pub fn expect_int_register(operand: &Operand, evaluator: &mut Evaluator) -> bool {
    if !evaluator.has_int_register(operand.value()) {
        evaluator
            .diagnostics_mut()
            .error(format!("Integer register not found: {}", operand.value()));
        return false;
    }
    true
}

pub fn expect_fp_register(operand: &Operand, evaluator: &mut Evaluator) -> bool {
    if !evaluator.has_fp_register(operand.value()) {
        evaluator.diagnostics_mut().error(format!(
            "Floating-point register not found: {}",
            operand.value()
        ));
        return false;
    }
    true
}

pub fn parse_immediate(name: &str, operand: &Operand, evaluator: &mut Evaluator) -> Option<i32> {
    match operand.parse_int() {
        Some(value) => Some(value),
        None => {
            evaluator.diagnostics_mut().error(format!(
                "{} instruction immediate must be an integer, got '{}'.",
                name,
                operand.value()
            ));
            None
        }
    }
}

pub fn expect_immediate_range(
    value: i32,
    min: i32,
    max: i32,
    evaluator: &mut Evaluator,
) -> bool {
    if value < min || value > max {
        evaluator.diagnostics_mut().error(format!(
            "Immediate value {} must be between {} and {}.",
            value, min, max
        ));
        return false;
    }
    true
}
