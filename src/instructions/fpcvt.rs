//! FP → integer conversions. The destination is an integer register; NaN
//! and infinity are rejected with a diagnostic before any write.

use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::{expect_fp_register, expect_int_register, expect_operand_count};

fn check_int_from_fp(name: &str, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
    expect_operand_count(name, operands, 2, evaluator)
        && expect_int_register(&operands[0], evaluator)
        && expect_fp_register(&operands[1], evaluator)
}

fn finite_or_diagnose(name: &str, value: f64, evaluator: &mut Evaluator) -> bool {
    if value.is_nan() || value.is_infinite() {
        evaluator
            .diagnostics_mut()
            .error(format!("{} instruction cannot convert NaN or infinity.", name));
        return false;
    }
    true
}

macro_rules! fp_to_int {
    ($handler:ident, $mnemonic:literal, |$value:ident| $convert:expr) => {
        pub struct $handler;

        impl InstructionHandler for $handler {
            fn name(&self) -> &'static str {
                $mnemonic
            }

            fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
                if !self.check_operands(operands, evaluator) {
                    return;
                }

                let $value = evaluator.fp_register_value(&operands[1]);
                if !finite_or_diagnose($mnemonic, $value, evaluator) {
                    return;
                }
                evaluator.set_register_value(&operands[0], $convert);
            }

            fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
                check_int_from_fp($mnemonic, operands, evaluator)
            }
        }
    };
}

fp_to_int!(CvtWD, "cvt.w.d", |value| value as i32);
fp_to_int!(TruncWD, "trunc.w.d", |value| value.trunc() as i32);
fp_to_int!(FloorWD, "floor.w.d", |value| value.floor() as i32);
fp_to_int!(FloorWS, "floor.w.s", |value| (value as f32).floor() as i32);
fp_to_int!(CeilWS, "ceil.w.s", |value| (value as f32).ceil() as i32);
// Rounds half up.
fp_to_int!(RoundWS, "round.w.s", |value| ((value as f32) + 0.5).floor() as i32);
