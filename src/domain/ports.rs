use crate::core::engine::Evaluator;
use crate::domain::model::Operand;

/// Resolved run configuration consumed by the driver and the engine.
pub trait RunConfig: Send + Sync {
    fn program_path(&self) -> &str;
    fn memory_size(&self) -> usize;
    fn debug(&self) -> bool;
}

/// Console port carrying syscall input/output. The binary wires stdin/stdout;
/// tests script input and capture output.
pub trait Console: Send {
    /// Emits one line of program output.
    fn print_line(&mut self, text: &str);

    /// Reads one line of input. `Ok(None)` signals end of input.
    fn read_line(&mut self) -> std::io::Result<Option<String>>;

    /// Reads a single character. `Ok(None)` signals end of input.
    fn read_char(&mut self) -> std::io::Result<Option<char>>;
}

/// One mnemonic's validation and execution.
///
/// `check_operands` records diagnostics and returns false on malformed
/// operands; `execute` must call it first and bail out when it fails, so a
/// rejected instruction never touches machine state.
pub trait InstructionHandler: Send + Sync {
    fn name(&self) -> &'static str;

    fn execute(&self, operands: &[Operand], evaluator: &mut Evaluator);

    fn check_operands(&self, operands: &[Operand], evaluator: &mut Evaluator) -> bool;
}
