use crate::core::diagnostics::Diagnostics;
use crate::domain::model::{DataType, Instruction, Operand, Variable};
use crate::utils::error::{AsmError, Result};
use crate::utils::validation::is_valid_register_name;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

static INT_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+$").expect("int literal pattern is valid"));
static DECIMAL_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("decimal literal pattern is valid"));
static QUOTED_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^".*"$"#).expect("quoted literal pattern is valid"));

/// Result of a parse: the `.text` entries (labels included as pseudo-entries)
/// and the `.data` declarations in source order.
#[derive(Debug, Default)]
pub struct ParsedProgram {
    pub instructions: Vec<Instruction>,
    pub variables: Vec<Variable>,
}

/// Two-section assembly parser. Structural problems are accumulated as
/// diagnostics rather than aborting, so one pass reports everything wrong
/// with a program.
#[derive(Debug, Default)]
pub struct Parser {
    diagnostics: Diagnostics,
    defined_labels: HashSet<String>,
    used_labels: HashSet<String>,
    defined_variables: HashSet<String>,
    used_variables: HashSet<String>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<ParsedProgram> {
        if path.extension().and_then(|ext| ext.to_str()) != Some("asm") {
            return Err(AsmError::InvalidProgram {
                message: "File must have .asm extension".to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let lines: Vec<&str> = content.lines().collect();
        if lines.is_empty() {
            return Err(AsmError::InvalidProgram {
                message: "File is empty or unreadable".to_string(),
            });
        }

        Ok(self.parse(&lines))
    }

    pub fn parse<S: AsRef<str>>(&mut self, lines: &[S]) -> ParsedProgram {
        let mut program = ParsedProgram::default();

        if !self.validate_sections(lines) {
            return program;
        }

        self.process_lines(lines, &mut program);
        self.validate_labels();

        program
    }

    fn validate_sections<S: AsRef<str>>(&mut self, lines: &[S]) -> bool {
        let mut has_data = false;
        let mut has_text = false;

        for line in lines {
            match line.as_ref().trim() {
                ".data" => {
                    if has_data {
                        self.diagnostics.error("Duplicate .data section found.");
                        return false;
                    }
                    has_data = true;
                }
                ".text" => {
                    if has_text {
                        self.diagnostics.error("Duplicate .text section found.");
                        return false;
                    }
                    has_text = true;
                }
                _ => {}
            }
        }

        if !(has_data && has_text) {
            self.diagnostics
                .error("Program must contain both .data and .text sections.");
            return false;
        }

        true
    }

    fn process_lines<S: AsRef<str>>(&mut self, lines: &[S], program: &mut ParsedProgram) {
        let mut in_text_section = false;

        for raw in lines {
            let line = raw.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = strip_inline_comment(line);
            match line.as_str() {
                "" => continue,
                ".data" => {
                    in_text_section = false;
                    continue;
                }
                ".text" => {
                    in_text_section = true;
                    continue;
                }
                _ => {}
            }

            if in_text_section {
                self.process_instruction(&line, program);
            } else {
                self.process_data_declaration(&line, program);
            }
        }
    }

    fn process_data_declaration(&mut self, line: &str, program: &mut ParsedProgram) {
        let mut parts = line.splitn(3, char::is_whitespace);
        let Some(name) = parts.next() else { return };
        let Some(keyword) = parts.next() else { return };
        let value = parts.next().unwrap_or("").trim();

        let name = name.strip_suffix(':').unwrap_or(name);

        let Some(ty) = DataType::from_keyword(keyword) else {
            self.diagnostics.error(format!(
                "Invalid data type: {} for variable: {}",
                keyword, name
            ));
            return;
        };

        if self.defined_variables.contains(name) {
            self.diagnostics
                .error(format!("Duplicate variable declaration: {}", name));
            return;
        }

        let shape_ok = match ty {
            DataType::Word | DataType::Byte | DataType::Half => INT_LITERAL.is_match(value),
            DataType::Float | DataType::Double => DECIMAL_LITERAL.is_match(value),
            DataType::Ascii | DataType::Asciiz => QUOTED_LITERAL.is_match(value),
            DataType::Space => INT_LITERAL.is_match(value) && !value.starts_with('-'),
        };
        if !shape_ok {
            self.diagnostics
                .error(format!("Invalid value for {}: {}", ty.keyword(), value));
            return;
        }

        self.defined_variables.insert(name.to_string());
        program.variables.push(Variable::new(name, ty, value));
    }

    fn process_instruction(&mut self, line: &str, program: &mut ParsedProgram) {
        let mut line = line;
        if let Some((label_part, rest)) = line.split_once(':') {
            let label_name = label_part.trim();
            if !label_name.is_empty() {
                self.process_label(label_name, program);
            }
            line = rest.trim_start();
            if line.is_empty() {
                return;
            }
        }

        let parts = tokenize_instruction(line);
        let Some((name, operand_parts)) = parts.split_first() else {
            return;
        };

        let mut operands = Vec::new();
        for part in operand_parts {
            let operand = part.trim();
            if !operand.is_empty() {
                self.track_operand_usage(operand);
                operands.push(Operand::new(operand));
            }
        }

        program.instructions.push(Instruction::new(name, operands));
    }

    fn process_label(&mut self, name: &str, program: &mut ParsedProgram) {
        if !self.defined_labels.insert(name.to_string()) {
            self.diagnostics
                .error(format!("Duplicate label defined: {}", name));
        }
        program
            .instructions
            .push(Instruction::new(format!("{}:", name), Vec::new()));
    }

    fn track_operand_usage(&mut self, operand: &str) {
        if let (Some(open), Some(close)) = (operand.find('('), operand.find(')')) {
            if open < close {
                let register = &operand[open + 1..close];
                if register.starts_with('$') {
                    self.validate_register(register);
                }

                if open > 0 {
                    let displacement = &operand[..open];
                    if displacement.parse::<i32>().is_err() {
                        self.track_symbol_usage(displacement);
                    }
                }
                return;
            }
        }

        if operand.starts_with('$') {
            self.validate_register(operand);
        } else if operand.parse::<i32>().is_err() {
            self.track_symbol_usage(operand);
        }
    }

    fn track_symbol_usage(&mut self, symbol: &str) {
        if self.defined_variables.contains(symbol) {
            self.used_variables.insert(symbol.to_string());
        } else {
            self.used_labels.insert(symbol.to_string());
        }
    }

    fn validate_register(&mut self, register: &str) {
        if !is_valid_register_name(register) {
            self.diagnostics
                .error(format!("Invalid register: {}", register));
        }
    }

    fn validate_labels(&mut self) {
        let mut undefined: Vec<&String> = self
            .used_labels
            .difference(&self.defined_labels)
            .collect();
        undefined.sort();
        for label in undefined {
            self.diagnostics.error(format!("Undefined label: {}", label));
        }
    }
}

/// Strips a trailing `#` comment, honoring string literals so a `#` inside
/// quotes (escapes included) stays content.
fn strip_inline_comment(line: &str) -> String {
    let mut in_string = false;
    let mut escaped = false;

    for (at, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '#' if !in_string => return line[..at].trim().to_string(),
            _ => {}
        }
    }

    line.to_string()
}

/// Splits an instruction line on commas and whitespace, keeping a
/// parenthesized group such as `8($t0)` as a single token.
fn tokenize_instruction(line: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_parentheses = false;

    for c in line.chars() {
        match c {
            '(' => {
                in_parentheses = true;
                current.push(c);
            }
            ')' => {
                in_parentheses = false;
                current.push(c);
            }
            ',' if !in_parentheses => {
                if !current.is_empty() {
                    parts.push(current.trim().to_string());
                    current.clear();
                }
            }
            c if c.is_whitespace() && !in_parentheses => {
                if !current.is_empty() {
                    parts.push(current.trim().to_string());
                    current.clear();
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        parts.push(current.trim().to_string());
    }

    parts
}
