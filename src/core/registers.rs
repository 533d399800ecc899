use std::collections::HashMap;

pub const CAUSE_INDEX: usize = 13;
pub const EPC_INDEX: usize = 14;

/// Integer register file. Registers are addressed by source-level name and
/// cover the extended dialect set (`$a0..$a7`, `$t0..$t31`, `$v0..$v31`,
/// `$ra`/`$hi`/`$lo`) plus the standard MIPS names the parser grammar
/// admits. `$zero` reads as 0 and ignores writes.
#[derive(Debug)]
pub struct IntRegisters {
    values: Vec<i32>,
    index: HashMap<String, usize>,
    zero: usize,
}

impl IntRegisters {
    pub fn new() -> Self {
        let mut values = Vec::new();
        let mut index = HashMap::new();

        let slot = |index: &mut HashMap<String, usize>, values: &mut Vec<i32>, name: String| {
            index.insert(name, values.len());
            values.push(0);
        };

        for i in 0..8 {
            slot(&mut index, &mut values, format!("$a{}", i));
        }
        for i in 0..32 {
            slot(&mut index, &mut values, format!("$t{}", i));
            slot(&mut index, &mut values, format!("$v{}", i));
        }
        for name in ["$ra", "$hi", "$lo"] {
            slot(&mut index, &mut values, name.to_string());
        }
        for i in 0..8 {
            slot(&mut index, &mut values, format!("$s{}", i));
        }
        for name in ["$at", "$k0", "$k1", "$gp", "$sp", "$fp"] {
            slot(&mut index, &mut values, name.to_string());
        }

        let zero = values.len();
        index.insert("$zero".to_string(), zero);
        values.push(0);

        Self {
            values,
            index,
            zero,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<i32> {
        self.index.get(name).map(|&at| self.values[at])
    }

    /// Returns false when the register name is unknown.
    pub fn set(&mut self, name: &str, value: i32) -> bool {
        match self.index.get(name) {
            Some(&at) if at == self.zero => true,
            Some(&at) => {
                self.values[at] = value;
                true
            }
            None => false,
        }
    }
}

impl Default for IntRegisters {
    fn default() -> Self {
        Self::new()
    }
}

/// Floating-point register file: `$f0..$f31`, each holding an `f64`.
/// Single-precision operations truncate through `f32` at the call sites.
#[derive(Debug)]
pub struct FpRegisters {
    values: [f64; 32],
    index: HashMap<String, usize>,
}

impl FpRegisters {
    pub fn new() -> Self {
        let mut index = HashMap::new();
        for i in 0..32 {
            index.insert(format!("$f{}", i), i);
        }
        Self {
            values: [0.0; 32],
            index,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.index.get(name).map(|&at| self.values[at])
    }

    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match self.index.get(name) {
            Some(&at) => {
                self.values[at] = value;
                true
            }
            None => false,
        }
    }
}

impl Default for FpRegisters {
    fn default() -> Self {
        Self::new()
    }
}

/// Coprocessor-0 file: `cp0_0..cp0_31`, with `$cause` and `$epc` aliased to
/// the MIPS Cause/EPC register numbers.
#[derive(Debug)]
pub struct Cp0Registers {
    values: [i32; 32],
}

impl Cp0Registers {
    pub fn new() -> Self {
        Self { values: [0; 32] }
    }

    fn resolve(name: &str) -> Option<usize> {
        match name {
            "$cause" => Some(CAUSE_INDEX),
            "$epc" => Some(EPC_INDEX),
            _ => {
                let numbered = name.strip_prefix('$').unwrap_or(name);
                let n: usize = numbered.strip_prefix("cp0_")?.parse().ok()?;
                (n < 32).then_some(n)
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        Self::resolve(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<i32> {
        Self::resolve(name).map(|at| self.values[at])
    }

    pub fn set(&mut self, name: &str, value: i32) -> bool {
        match Self::resolve(name) {
            Some(at) => {
                self.values[at] = value;
                true
            }
            None => false,
        }
    }
}

impl Default for Cp0Registers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_and_standard_names_exist() {
        let regs = IntRegisters::new();
        for name in ["$a0", "$a7", "$t0", "$t31", "$v0", "$v31", "$ra", "$hi", "$lo", "$s0", "$sp", "$fp", "$gp", "$zero", "$at", "$k1"] {
            assert!(regs.contains(name), "{} missing", name);
            assert_eq!(regs.get(name), Some(0));
        }
        assert!(!regs.contains("$t32"));
        assert!(!regs.contains("$q0"));
    }

    #[test]
    fn test_zero_register_ignores_writes() {
        let mut regs = IntRegisters::new();
        assert!(regs.set("$zero", 99));
        assert_eq!(regs.get("$zero"), Some(0));

        assert!(regs.set("$t0", 99));
        assert_eq!(regs.get("$t0"), Some(99));
    }

    #[test]
    fn test_unknown_register_set_reports_false() {
        let mut regs = IntRegisters::new();
        assert!(!regs.set("$bogus", 1));
        assert_eq!(regs.get("$bogus"), None);
    }

    #[test]
    fn test_fp_registers_hold_doubles() {
        let mut regs = FpRegisters::new();
        assert!(regs.set("$f12", 3.5));
        assert_eq!(regs.get("$f12"), Some(3.5));
        assert!(!regs.set("$f32", 1.0));
    }

    #[test]
    fn test_cp0_aliases() {
        let mut regs = Cp0Registers::new();
        assert!(regs.set("$cause", 9));
        assert_eq!(regs.get("cp0_13"), Some(9));
        assert!(regs.set("$epc", 42));
        assert_eq!(regs.get("$cp0_14"), Some(42));
        assert!(!regs.set("cp0_32", 1));
    }
}
