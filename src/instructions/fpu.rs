//! Floating-point arithmetic. FP registers hold doubles; the `.s` forms
//! compute through `f32` so single-precision rounding is observable.

use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::{expect_fp_register, expect_operand_count};

fn check_three_fp(name: &str, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
    expect_operand_count(name, operands, 3, evaluator)
        && expect_fp_register(&operands[0], evaluator)
        && expect_fp_register(&operands[1], evaluator)
        && expect_fp_register(&operands[2], evaluator)
}

fn check_two_fp(name: &str, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
    expect_operand_count(name, operands, 2, evaluator)
        && expect_fp_register(&operands[0], evaluator)
        && expect_fp_register(&operands[1], evaluator)
}

macro_rules! fp_single_binop {
    ($handler:ident, $mnemonic:literal, $op:expr) => {
        pub struct $handler;

        impl InstructionHandler for $handler {
            fn name(&self) -> &'static str {
                $mnemonic
            }

            fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
                if !self.check_operands(operands, evaluator) {
                    return;
                }

                let lhs = evaluator.fp_register_value(&operands[1]) as f32;
                let rhs = evaluator.fp_register_value(&operands[2]) as f32;
                let apply: fn(f32, f32) -> f32 = $op;
                evaluator.set_fp_register_value(&operands[0], apply(lhs, rhs) as f64);
            }

            fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
                check_three_fp($mnemonic, operands, evaluator)
            }
        }
    };
}

macro_rules! fp_double_binop {
    ($handler:ident, $mnemonic:literal, $op:expr) => {
        pub struct $handler;

        impl InstructionHandler for $handler {
            fn name(&self) -> &'static str {
                $mnemonic
            }

            fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
                if !self.check_operands(operands, evaluator) {
                    return;
                }

                let lhs = evaluator.fp_register_value(&operands[1]);
                let rhs = evaluator.fp_register_value(&operands[2]);
                let apply: fn(f64, f64) -> f64 = $op;
                evaluator.set_fp_register_value(&operands[0], apply(lhs, rhs));
            }

            fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
                check_three_fp($mnemonic, operands, evaluator)
            }
        }
    };
}

fp_single_binop!(AddS, "add.s", |a, b| a + b);
fp_single_binop!(SubS, "sub.s", |a, b| a - b);
fp_single_binop!(MulS, "mul.s", |a, b| a * b);

fp_double_binop!(AddD, "add.d", |a, b| a + b);
fp_double_binop!(SubD, "sub.d", |a, b| a - b);
fp_double_binop!(MulD, "mul.d", |a, b| a * b);

pub struct DivS;

impl InstructionHandler for DivS {
    fn name(&self) -> &'static str {
        "div.s"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.fp_register_value(&operands[1]) as f32;
        let rhs = evaluator.fp_register_value(&operands[2]) as f32;
        if rhs == 0.0 {
            evaluator
                .diagnostics_mut()
                .error("div.s instruction division by zero.");
            return;
        }
        evaluator.set_fp_register_value(&operands[0], (lhs / rhs) as f64);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        check_three_fp("div.s", operands, evaluator)
    }
}

pub struct DivD;

impl InstructionHandler for DivD {
    fn name(&self) -> &'static str {
        "div.d"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.fp_register_value(&operands[1]);
        let rhs = evaluator.fp_register_value(&operands[2]);
        if rhs == 0.0 {
            evaluator
                .diagnostics_mut()
                .error("div.d instruction division by zero.");
            return;
        }
        evaluator.set_fp_register_value(&operands[0], lhs / rhs);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        check_three_fp("div.d", operands, evaluator)
    }
}

pub struct AbsS;

impl InstructionHandler for AbsS {
    fn name(&self) -> &'static str {
        "abs.s"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.fp_register_value(&operands[1]) as f32;
        evaluator.set_fp_register_value(&operands[0], value.abs() as f64);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        check_two_fp("abs.s", operands, evaluator)
    }
}

pub struct AbsD;

impl InstructionHandler for AbsD {
    fn name(&self) -> &'static str {
        "abs.d"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.fp_register_value(&operands[1]);
        evaluator.set_fp_register_value(&operands[0], value.abs());
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        check_two_fp("abs.d", operands, evaluator)
    }
}

pub struct SqrtS;

impl InstructionHandler for SqrtS {
    fn name(&self) -> &'static str {
        "sqrt.s"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.fp_register_value(&operands[1]) as f32;
        if value < 0.0 {
            evaluator
                .diagnostics_mut()
                .error("sqrt.s instruction operand is negative.");
            return;
        }
        evaluator.set_fp_register_value(&operands[0], value.sqrt() as f64);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        check_two_fp("sqrt.s", operands, evaluator)
    }
}

pub struct SqrtD;

impl InstructionHandler for SqrtD {
    fn name(&self) -> &'static str {
        "sqrt.d"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.fp_register_value(&operands[1]);
        if value < 0.0 {
            evaluator
                .diagnostics_mut()
                .error("sqrt.d instruction operand is negative.");
            return;
        }
        evaluator.set_fp_register_value(&operands[0], value.sqrt());
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        check_two_fp("sqrt.d", operands, evaluator)
    }
}

pub struct CEqS;

impl InstructionHandler for CEqS {
    fn name(&self) -> &'static str {
        "c.eq.s"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.fp_register_value(&operands[0]) as f32;
        let rhs = evaluator.fp_register_value(&operands[1]) as f32;
        evaluator.set_fp_condition_flag(lhs == rhs);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        check_two_fp("c.eq.s", operands, evaluator)
    }
}

pub struct CEqD;

impl InstructionHandler for CEqD {
    fn name(&self) -> &'static str {
        "c.eq.d"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let lhs = evaluator.fp_register_value(&operands[0]);
        let rhs = evaluator.fp_register_value(&operands[1]);
        evaluator.set_fp_condition_flag(lhs == rhs);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        check_two_fp("c.eq.d", operands, evaluator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::support::harness::{evaluator, fp_reg, run, set_fp_reg};

    #[test]
    fn test_double_arithmetic() {
        let (mut ev, _console) = evaluator();
        set_fp_reg(&mut ev, "$f2", 1.5);
        set_fp_reg(&mut ev, "$f4", 2.0);

        run(&AddD, &["$f0", "$f2", "$f4"], &mut ev);
        assert_eq!(fp_reg(&mut ev, "$f0"), 3.5);

        run(&MulD, &["$f0", "$f2", "$f4"], &mut ev);
        assert_eq!(fp_reg(&mut ev, "$f0"), 3.0);

        run(&DivD, &["$f0", "$f4", "$f2"], &mut ev);
        assert!((fp_reg(&mut ev, "$f0") - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_precision_rounds_through_f32() {
        let (mut ev, _console) = evaluator();
        set_fp_reg(&mut ev, "$f2", 0.1);
        set_fp_reg(&mut ev, "$f4", 0.2);

        run(&AddS, &["$f0", "$f2", "$f4"], &mut ev);
        assert_eq!(fp_reg(&mut ev, "$f0"), (0.1f32 + 0.2f32) as f64);
    }

    #[test]
    fn test_fp_division_by_zero() {
        let (mut ev, _console) = evaluator();
        set_fp_reg(&mut ev, "$f2", 1.0);
        set_fp_reg(&mut ev, "$f0", 7.0);

        run(&DivD, &["$f0", "$f2", "$f4"], &mut ev);
        assert!(ev.diagnostics().errors()[0].contains("division by zero"));
        assert_eq!(fp_reg(&mut ev, "$f0"), 7.0);
    }

    #[test]
    fn test_sqrt_and_abs() {
        let (mut ev, _console) = evaluator();
        set_fp_reg(&mut ev, "$f2", -2.25);

        run(&AbsD, &["$f0", "$f2"], &mut ev);
        assert_eq!(fp_reg(&mut ev, "$f0"), 2.25);

        run(&SqrtD, &["$f4", "$f0"], &mut ev);
        assert_eq!(fp_reg(&mut ev, "$f4"), 1.5);

        run(&SqrtD, &["$f4", "$f2"], &mut ev);
        assert!(ev.diagnostics().errors()[0].contains("negative"));
    }

    #[test]
    fn test_compare_sets_condition_flag() {
        let (mut ev, _console) = evaluator();
        set_fp_reg(&mut ev, "$f0", 1.5);
        set_fp_reg(&mut ev, "$f2", 1.5);

        run(&CEqD, &["$f0", "$f2"], &mut ev);
        assert!(ev.fp_condition_flag());

        set_fp_reg(&mut ev, "$f2", 2.0);
        run(&CEqD, &["$f0", "$f2"], &mut ev);
        assert!(!ev.fp_condition_flag());
    }
}
