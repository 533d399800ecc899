//! SPIM-style console syscalls, dispatched on `$v0`.

use crate::core::engine::Evaluator;
use crate::domain::model::Operand;
use crate::domain::ports::InstructionHandler;
use crate::instructions::support::reg;

const MAX_SBRK_SIZE: i32 = 16 * 1024 * 1024;
const MAX_STRING_LENGTH: usize = 65536;

pub struct Syscall;

impl InstructionHandler for Syscall {
    fn name(&self) -> &'static str {
        "syscall"
    }

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator) {
        if !self.check_operands(operands, evaluator) {
            return;
        }

        let service = evaluator.register_value(&reg("$v0"));
        match service {
            -1 => evaluator
                .diagnostics_mut()
                .error("No valid value stored in $v0 register for syscall instruction."),
            1 => self.print_integer(evaluator),
            2 => self.print_float(evaluator),
            3 => self.print_double(evaluator),
            4 => self.print_string(evaluator),
            5 => self.read_integer(evaluator),
            6 => self.read_float(evaluator),
            7 => self.read_double(evaluator),
            8 => self.read_string(evaluator),
            9 => self.sbrk(evaluator),
            10 => evaluator.request_exit(0),
            11 => self.print_character(evaluator),
            12 => self.read_character(evaluator),
            17 => self.exit2(evaluator),
            other => evaluator
                .diagnostics_mut()
                .error(format!("Unsupported syscall value: {}", other)),
        }
    }

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool {
        if !operands.is_empty() {
            evaluator
                .diagnostics_mut()
                .error("syscall instruction must have no operands.");
            return false;
        }
        true
    }
}

impl Syscall {
    /// Syscall 1: print the integer in `$a0`.
    fn print_integer(&self, evaluator: &mut Evaluator) {
        let value = evaluator.register_value(&reg("$a0"));
        evaluator.print_line(&value.to_string());
    }

    /// Syscall 2: print `$f12` as single precision.
    fn print_float(&self, evaluator: &mut Evaluator) {
        let value = evaluator.fp_register_value(&reg("$f12")) as f32;
        evaluator.print_line(&value.to_string());
    }

    /// Syscall 3: print `$f12` as double precision.
    fn print_double(&self, evaluator: &mut Evaluator) {
        let value = evaluator.fp_register_value(&reg("$f12"));
        evaluator.print_line(&value.to_string());
    }

    /// Syscall 4: print the NUL-terminated string at `$a0`, processing
    /// escape sequences stored in the data segment.
    fn print_string(&self, evaluator: &mut Evaluator) {
        let address = evaluator.register_value(&reg("$a0"));
        if address < 0 {
            evaluator
                .diagnostics_mut()
                .error(format!("Invalid memory address for string: {}", address));
            return;
        }

        let mut raw = String::new();
        let mut current = address;
        loop {
            let byte = evaluator.load_byte(current);
            if byte == 0 {
                break;
            }
            raw.push(byte as u8 as char);
            current += 1;
            if raw.len() > MAX_STRING_LENGTH {
                evaluator
                    .diagnostics_mut()
                    .error("String too long (>64KB) or not null-terminated");
                return;
            }
        }

        let processed = parse_escape_sequences(&raw);
        evaluator.print_line(&processed);
    }

    /// Syscall 11: print the character in the low byte of `$a0`.
    fn print_character(&self, evaluator: &mut Evaluator) {
        let value = evaluator.register_value(&reg("$a0"));
        let character = (value & 0xFF) as u8 as char;
        evaluator.print_line(&character.to_string());
    }

    /// Syscall 5: read an integer into `$v0`.
    fn read_integer(&self, evaluator: &mut Evaluator) {
        match evaluator.read_input_line() {
            Ok(None) => {
                evaluator
                    .diagnostics_mut()
                    .error("End of input reached while reading integer");
            }
            Ok(Some(line)) => {
                let line = line.trim();
                let Some(first) = line.split_whitespace().next() else {
                    evaluator.set_register_value(&reg("$v0"), 0);
                    return;
                };
                match first.parse::<i32>() {
                    Ok(value) => evaluator.set_register_value(&reg("$v0"), value),
                    Err(e) => {
                        evaluator
                            .diagnostics_mut()
                            .error(format!("Invalid integer format in input: {}", e));
                        evaluator.set_register_value(&reg("$v0"), 0);
                    }
                }
            }
            Err(e) => {
                evaluator
                    .diagnostics_mut()
                    .error(format!("I/O error while reading integer: {}", e));
                evaluator.set_register_value(&reg("$v0"), 0);
            }
        }
    }

    /// Syscall 6: read a float into `$f0`.
    fn read_float(&self, evaluator: &mut Evaluator) {
        match evaluator.read_input_line() {
            Ok(None) => {
                evaluator
                    .diagnostics_mut()
                    .error("End of input reached while reading float");
            }
            Ok(Some(line)) => {
                let line = line.trim();
                let Some(first) = line.split_whitespace().next() else {
                    evaluator.set_fp_register_value(&reg("$f0"), 0.0);
                    return;
                };
                match first.parse::<f32>() {
                    Ok(value) => evaluator.set_fp_register_value(&reg("$f0"), value as f64),
                    Err(e) => {
                        evaluator
                            .diagnostics_mut()
                            .error(format!("Invalid float format in input: {}", e));
                        evaluator.set_fp_register_value(&reg("$f0"), 0.0);
                    }
                }
            }
            Err(e) => {
                evaluator
                    .diagnostics_mut()
                    .error(format!("I/O error while reading float: {}", e));
                evaluator.set_fp_register_value(&reg("$f0"), 0.0);
            }
        }
    }

    /// Syscall 7: read a double into `$f0`.
    fn read_double(&self, evaluator: &mut Evaluator) {
        match evaluator.read_input_line() {
            Ok(None) => {
                evaluator
                    .diagnostics_mut()
                    .error("End of input reached while reading double");
            }
            Ok(Some(line)) => {
                let line = line.trim();
                let Some(first) = line.split_whitespace().next() else {
                    evaluator.set_fp_register_value(&reg("$f0"), 0.0);
                    return;
                };
                match first.parse::<f64>() {
                    Ok(value) => evaluator.set_fp_register_value(&reg("$f0"), value),
                    Err(e) => {
                        evaluator
                            .diagnostics_mut()
                            .error(format!("Invalid double format in input: {}", e));
                        evaluator.set_fp_register_value(&reg("$f0"), 0.0);
                    }
                }
            }
            Err(e) => {
                evaluator
                    .diagnostics_mut()
                    .error(format!("I/O error while reading double: {}", e));
                evaluator.set_fp_register_value(&reg("$f0"), 0.0);
            }
        }
    }

    /// Syscall 8: read a line into the buffer at `$a0`, at most `$a1` bytes
    /// including the NUL terminator.
    fn read_string(&self, evaluator: &mut Evaluator) {
        let buffer_address = evaluator.register_value(&reg("$a0"));
        let max_length = evaluator.register_value(&reg("$a1"));

        if buffer_address < 0 {
            evaluator.diagnostics_mut().error(format!(
                "Invalid buffer address for read_string: {}",
                buffer_address
            ));
            return;
        }
        if max_length <= 0 {
            evaluator.diagnostics_mut().error(format!(
                "Invalid buffer length for read_string: {}",
                max_length
            ));
            return;
        }

        match evaluator.read_input_line() {
            Ok(None) => {
                evaluator.store_byte(buffer_address, 0);
            }
            Ok(Some(line)) => {
                let bytes = line.as_bytes();
                let length_to_store = bytes.len().min(max_length as usize - 1);
                for (at, byte) in bytes[..length_to_store].iter().enumerate() {
                    evaluator.store_byte(buffer_address + at as i32, *byte as i8);
                }
                evaluator.store_byte(buffer_address + length_to_store as i32, 0);
            }
            Err(e) => {
                evaluator
                    .diagnostics_mut()
                    .error(format!("I/O error while reading string: {}", e));
                evaluator.store_byte(buffer_address, 0);
            }
        }
    }

    /// Syscall 12: read a character into `$v0`, 0 on end of input.
    fn read_character(&self, evaluator: &mut Evaluator) {
        match evaluator.read_input_char() {
            Ok(Some(character)) => {
                evaluator.set_register_value(&reg("$v0"), (character as u32 & 0xFF) as i32);
            }
            Ok(None) => evaluator.set_register_value(&reg("$v0"), 0),
            Err(e) => {
                evaluator
                    .diagnostics_mut()
                    .error(format!("I/O error while reading character: {}", e));
                evaluator.set_register_value(&reg("$v0"), 0);
            }
        }
    }

    /// Syscall 9: allocate `$a0` bytes on the heap, address into `$v0`.
    fn sbrk(&self, evaluator: &mut Evaluator) {
        let bytes = evaluator.register_value(&reg("$a0"));

        if bytes < 0 {
            evaluator
                .diagnostics_mut()
                .error(format!("Invalid allocation size for sbrk: {}", bytes));
            evaluator.set_register_value(&reg("$v0"), -1);
            return;
        }
        if bytes > MAX_SBRK_SIZE {
            evaluator.diagnostics_mut().error(format!(
                "Allocation size too large for sbrk: {} (max: {})",
                bytes, MAX_SBRK_SIZE
            ));
            evaluator.set_register_value(&reg("$v0"), -1);
            return;
        }

        match evaluator.allocate_heap(bytes) {
            Some(address) => evaluator.set_register_value(&reg("$v0"), address),
            None => evaluator.set_register_value(&reg("$v0"), -1),
        }
    }

    /// Syscall 17: exit with the code in `$a0`.
    fn exit2(&self, evaluator: &mut Evaluator) {
        let code = evaluator.register_value(&reg("$a0"));
        evaluator.request_exit(code);
    }
}

/// Converts stored escape sequences (`\n`, `\t`, ...) to their characters.
/// Unknown escapes are kept verbatim, a trailing lone backslash survives.
fn parse_escape_sequences(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut escape = false;

    for current in input.chars() {
        if escape {
            match current {
                'n' => result.push('\n'),
                't' => result.push('\t'),
                'r' => result.push('\r'),
                '0' => result.push('\0'),
                '\\' => result.push('\\'),
                '"' => result.push('"'),
                '\'' => result.push('\''),
                other => {
                    result.push('\\');
                    result.push(other);
                }
            }
            escape = false;
        } else if current == '\\' {
            escape = true;
        } else {
            result.push(current);
        }
    }

    if escape {
        result.push('\\');
    }

    result
}
