use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::{expect_fp_register, expect_int_register, expect_operand_count};

macro_rules! int_store {
    ($handler:ident, $mnemonic:literal, |$value:ident| $convert:expr, $store:ident) => {
        pub struct $handler;

        impl InstructionHandler for $handler {
            fn name(&self) -> &'static str {
                $mnemonic
            }

            fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
                if !self.check_operands(operands, evaluator) {
                    return;
                }

                let $value = evaluator.register_value(&operands[0]);
                let Some(address) = evaluator.resolve_address(&operands[1]) else {
                    return;
                };
                evaluator.$store(address, $convert);
            }

            fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
                expect_operand_count($mnemonic, operands, 2, evaluator)
                    && expect_int_register(&operands[0], evaluator)
            }
        }
    };
}

int_store!(Sb, "sb", |value| (value & 0xFF) as i8, store_byte);
int_store!(Sh, "sh", |value| (value & 0xFFFF) as i16, store_half_word);
int_store!(Sw, "sw", |value| value, store_word);
int_store!(Swl, "swl", |value| value, store_word_left);
int_store!(Swr, "swr", |value| value, store_word_right);

pub struct Sc;

impl InstructionHandler for Sc {
    fn name(&self) -> &'static str {
        "sc"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let Some(address) = evaluator.resolve_address(&operands[1]) else {
            return;
        };
        evaluator.store_conditional(&operands[0], address);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("sc", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
    }
}

pub struct Swc1;

impl InstructionHandler for Swc1 {
    fn name(&self) -> &'static str {
        "swc1"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.fp_register_value(&operands[0]) as f32;
        let Some(address) = evaluator.resolve_address(&operands[1]) else {
            return;
        };
        evaluator.store_float(address, value);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("swc1", operands, 2, evaluator)
            && expect_fp_register(&operands[0], evaluator)
    }
}

pub struct Sdc1;

impl InstructionHandler for Sdc1 {
    fn name(&self) -> &'static str {
        "sdc1"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let value = evaluator.fp_register_value(&operands[0]);
        let Some(address) = evaluator.resolve_address(&operands[1]) else {
            return;
        };
        evaluator.store_double_word(address, value.to_bits() as i64);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("sdc1", operands, 2, evaluator)
            && expect_fp_register(&operands[0], evaluator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::support::harness::{evaluator, run, set_fp_reg, set_int_reg};

    #[test]
    fn test_int_stores_narrow_correctly() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t0", 0x1234_5678);
        set_int_reg(&mut ev, "$t1", 0);

        run(&Sb, &["$t0", "0($t1)"], &mut ev);
        assert_eq!(ev.load_byte(0), 0x78);

        run(&Sh, &["$t0", "4($t1)"], &mut ev);
        assert_eq!(ev.load_half_word(4), 0x5678);

        run(&Sw, &["$t0", "8($t1)"], &mut ev);
        assert_eq!(ev.load_word(8), 0x1234_5678);
        assert!(!ev.diagnostics().has_errors());
    }

    #[test]
    fn test_store_to_bad_address_is_diagnosed() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t0", 7);
        set_int_reg(&mut ev, "$t1", -100);

        run(&Sw, &["$t0", "($t1)"], &mut ev);
        assert!(ev.diagnostics().errors()[0].contains("out of bounds"));
    }

    #[test]
    fn test_fp_stores() {
        let (mut ev, _console) = evaluator();
        set_fp_reg(&mut ev, "$f2", 0.5);

        run(&Swc1, &["$f2", "0"], &mut ev);
        assert_eq!(ev.load_float(0), 0.5);

        run(&Sdc1, &["$f2", "8"], &mut ev);
        assert_eq!(ev.load_double_word(8), (0.5f64).to_bits() as i64);
    }

    #[test]
    fn test_sc_without_ll_fails() {
        let (mut ev, _console) = evaluator();
        set_int_reg(&mut ev, "$t0", 5);
        run(&Sc, &["$t0", "0"], &mut ev);
        assert_eq!(ev.load_word(0), 0);
        assert_eq!(ev.register_value(&Operand::new("$t0")), 0);
    }
}
