//! Loads. Address operands go through `Evaluator::resolve_address`, so a
//! bare variable name, an absolute address, and the `disp(reg)` form all
//! work wherever an address is expected.

use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::{
    expect_fp_register, expect_immediate_range, expect_int_register, expect_operand_count,
    parse_immediate,
};

pub struct Li;

impl InstructionHandler for Li {
    fn name(&self) -> &'static str {
        "li"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let Some(value) = parse_immediate("li", &operands[1], evaluator) else {
            return;
        };
        evaluator.set_register_value(&operands[0], value);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("li", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
    }
}

pub struct La;

impl InstructionHandler for La {
    fn name(&self) -> &'static str {
        "la"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let Some(address) = evaluator.variable_address(operands[1].value()) else {
            return;
        };
        evaluator.load_address(&operands[0], address);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("la", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
    }
}

pub struct Lui;

impl InstructionHandler for Lui {
    fn name(&self) -> &'static str {
        "lui"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let Some(immediate) = parse_immediate("lui", &operands[1], evaluator) else {
            return;
        };
        if !expect_immediate_range(immediate, 0, 0xFFFF, evaluator) {
            return;
        }
        evaluator.set_register_value(&operands[0], immediate << 16);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("lui", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
    }
}

macro_rules! int_load {
    ($handler:ident, $mnemonic:literal, $load:ident) => {
        pub struct $handler;

        impl InstructionHandler for $handler {
            fn name(&self) -> &'static str {
                $mnemonic
            }

            fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
                if !self.check_operands(operands, evaluator) {
                    return;
                }

                let Some(address) = evaluator.resolve_address(&operands[1]) else {
                    return;
                };
                let value = evaluator.$load(address) as i32;
                evaluator.set_register_value(&operands[0], value);
            }

            fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
                expect_operand_count($mnemonic, operands, 2, evaluator)
                    && expect_int_register(&operands[0], evaluator)
            }
        }
    };
}

int_load!(Lw, "lw", load_word);
int_load!(Lb, "lb", load_byte);
int_load!(Lh, "lh", load_half_word);
int_load!(Lwl, "lwl", load_word_left);
int_load!(Lwr, "lwr", load_word_right);

pub struct Ll;

impl InstructionHandler for Ll {
    fn name(&self) -> &'static str {
        "ll"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let Some(address) = evaluator.resolve_address(&operands[1]) else {
            return;
        };
        evaluator.load_linked(&operands[0], address);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("ll", operands, 2, evaluator)
            && expect_int_register(&operands[0], evaluator)
    }
}

pub struct Lwc1;

impl InstructionHandler for Lwc1 {
    fn name(&self) -> &'static str {
        "lwc1"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let Some(address) = evaluator.resolve_address(&operands[1]) else {
            return;
        };
        let value = evaluator.load_float(address);
        evaluator.set_fp_register_value(&operands[0], value as f64);
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("lwc1", operands, 2, evaluator)
            && expect_fp_register(&operands[0], evaluator)
    }
}

pub struct Ldc1;

impl InstructionHandler for Ldc1 {
    fn name(&self) -> &'static str {
        "ldc1"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let Some(address) = evaluator.resolve_address(&operands[1]) else {
            return;
        };
        let bits = evaluator.load_double_word(address);
        evaluator.set_fp_register_value(&operands[0], f64::from_bits(bits as u64));
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        expect_operand_count("ldc1", operands, 2, evaluator)
            && expect_fp_register(&operands[0], evaluator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DataType, Variable};
    use crate::instructions::support::harness::{evaluator, fp_reg, int_reg, run, set_int_reg};

    #[test]
    fn test_li_and_lui() {
        let (mut ev, _console) = evaluator();

        run(&Li, &["$t0", "-42"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t0"), -42);

        run(&Lui, &["$t1", "4660"], &mut ev); // 0x1234
        assert_eq!(int_reg(&mut ev, "$t1"), 0x1234 << 16);

        run(&Lui, &["$t1", "65536"], &mut ev);
        assert!(ev.diagnostics().errors()[0].contains("between 0 and 65535"));
    }

    #[test]
    fn test_la_and_lw_through_variables() {
        let (mut ev, _console) = evaluator();
        ev.initialize_variables(&[
            Variable::new("first", DataType::Word, "10"),
            Variable::new("second", DataType::Word, "20"),
        ]);

        run(&La, &["$t0", "second"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t0"), 4);

        run(&Lw, &["$t1", "second"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t1"), 20);

        run(&Lw, &["$t2", "0($t0)"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t2"), 20);

        run(&La, &["$t3", "ghost"], &mut ev);
        assert!(ev.diagnostics().errors()[0].contains("Variable not found"));
    }

    #[test]
    fn test_lb_sign_extends() {
        let (mut ev, _console) = evaluator();
        ev.store_byte(8, -1);
        set_int_reg(&mut ev, "$t0", 8);

        run(&Lb, &["$t1", "($t0)"], &mut ev);
        assert_eq!(int_reg(&mut ev, "$t1"), -1);
    }

    #[test]
    fn test_fp_loads() {
        let (mut ev, _console) = evaluator();
        ev.store_float(0, 1.5);
        ev.store_double_word(8, (2.25f64).to_bits() as i64);

        run(&Lwc1, &["$f0", "0"], &mut ev);
        assert_eq!(fp_reg(&mut ev, "$f0"), 1.5);

        run(&Ldc1, &["$f2", "8"], &mut ev);
        assert_eq!(fp_reg(&mut ev, "$f2"), 2.25);
    }
}
