use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::{expect_int_register, expect_operand_count, parse_immediate};

macro_rules! register_register_op {
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

                let lhs = evaluator.register_value(&operands[1]);
                let rhs = evaluator.register_value(&operands[2]);
                let apply: fn(i32, i32) -> i32 = $op;
                evaluator.set_register_value(&operands[0], apply(lhs, rhs));
            }

            fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
                expect_operand_count($mnemonic, operands, 3, evaluator)
                    && expect_int_register(&operands[0], evaluator)
                    && expect_int_register(&operands[1], evaluator)
                    && expect_int_register(&operands[2], evaluator)
            }
        }
    };
}

macro_rules! register_immediate_op {
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

                let lhs = evaluator.register_value(&operands[1]);
                let Some(immediate) = parse_immediate($mnemonic, &operands[2], evaluator) else {
                    return;
                };
                let apply: fn(i32, i32) -> i32 = $op;
                evaluator.set_register_value(&operands[0], apply(lhs, immediate));
            }

            fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
                expect_operand_count($mnemonic, operands, 3, evaluator)
                    && expect_int_register(&operands[0], evaluator)
                    && expect_int_register(&operands[1], evaluator)
            }
        }
    };
}

register_register_op!(And, "and", |a, b| a & b);
register_register_op!(Or, "or", |a, b| a | b);
register_register_op!(Nor, "nor", |a, b| !(a | b));

register_immediate_op!(Andi, "andi", |a, b| a & b);
register_immediate_op!(Ori, "ori", |a, b| a | b);
register_immediate_op!(Xori, "xori", |a, b| a ^ b);
