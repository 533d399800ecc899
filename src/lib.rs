pub mod config;
pub mod core;
pub mod domain;
pub mod instructions;
pub mod utils;

pub use config::cli::StdConsole;
pub use config::{CliConfig, RunSettings};
pub use crate::core::diagnostics::Diagnostics;
pub use crate::core::engine::Evaluator;
pub use crate::core::parser::{ParsedProgram, Parser};
pub use domain::model::{DataType, ExitStatus, Instruction, Operand, Variable};
pub use domain::ports::{Console, InstructionHandler, RunConfig};
pub use instructions::InstructionSet;
pub use utils::error::{AsmError, Result};
