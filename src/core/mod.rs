pub mod diagnostics;
pub mod engine;
pub mod memory;
pub mod parser;
pub mod registers;

pub use crate::core::diagnostics::Diagnostics;
pub use crate::core::engine::Evaluator;
pub use crate::core::parser::{ParsedProgram, Parser};
pub use crate::utils::error::Result;
