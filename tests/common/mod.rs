#![allow(dead_code)]

use mipsrun::{Console, Diagnostics, Evaluator, ExitStatus, InstructionSet, Parser};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct ConsoleState {
    lines: VecDeque<String>,
    chars: VecDeque<char>,
    output: Vec<String>,
}

/// Console port with scripted input and captured output.
struct ScriptedConsole(Arc<Mutex<ConsoleState>>);

impl Console for ScriptedConsole {
    fn print_line(&mut self, text: &str) {
        self.0.lock().unwrap().output.push(text.to_string());
    }

    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        Ok(self.0.lock().unwrap().lines.pop_front())
    }

    fn read_char(&mut self) -> std::io::Result<Option<char>> {
        Ok(self.0.lock().unwrap().chars.pop_front())
    }
}

/// Everything observable from one program run.
pub struct Run {
    pub status: ExitStatus,
    pub output: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Run {
    pub fn assert_clean(&self) {
        assert!(
            self.errors.is_empty(),
            "expected no diagnostics, got: {:?}",
            self.errors
        );
    }
}

pub fn run_source(source: &str) -> Run {
    run_program(source, &[], "")
}

pub fn run_with_input(source: &str, lines: &[&str]) -> Run {
    run_program(source, lines, "")
}

pub fn run_with_chars(source: &str, chars: &str) -> Run {
    run_program(source, &[], chars)
}

/// Writes the source to a temporary `.asm` file, parses it, and evaluates it
/// against a scripted console, mirroring the binary's driver flow.
pub fn run_program(source: &str, lines: &[&str], chars: &str) -> Run {
    let mut file = tempfile::Builder::new().suffix(".asm").tempfile().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file.flush().unwrap();

    let mut parser = Parser::new();
    let program = parser.parse_file(file.path()).unwrap();
    assert!(
        !parser.diagnostics().has_errors(),
        "program has structural errors: {:?}",
        parser.diagnostics().errors()
    );

    let state = Arc::new(Mutex::new(ConsoleState {
        lines: lines.iter().map(|s| s.to_string()).collect(),
        chars: chars.chars().collect(),
        output: Vec::new(),
    }));
    let console = ScriptedConsole(Arc::clone(&state));

    let mut evaluator = Evaluator::new(64 * 1024, false, Box::new(console), Diagnostics::new());
    evaluator.initialize_variables(&program.variables);
    let status = evaluator.evaluate(&program.instructions, &InstructionSet::standard());
    let diagnostics = evaluator.into_diagnostics();

    let state = state.lock().unwrap();
    Run {
        status,
        output: state.output.clone(),
        errors: diagnostics.errors().to_vec(),
        warnings: diagnostics.warnings().to_vec(),
    }
}
