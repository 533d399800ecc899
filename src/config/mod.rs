pub mod cli;
pub mod toml_config;

use crate::core::memory::DEFAULT_MEMORY_SIZE;
use crate::domain::ports::RunConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_extension, validate_path, validate_range, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const MIN_MEMORY_SIZE: usize = 64 * 1024;
pub const MAX_MEMORY_SIZE: usize = 256 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "mipsrun")]
#[command(about = "A MIPS assembly interpreter")]
pub struct CliConfig {
    /// Path to the .asm program to run
    pub program: String,

    #[arg(long, short = 'd', help = "Enable instruction-level debug logging")]
    pub debug: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Optional TOML run-configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Main memory size in bytes")]
    pub memory_size: Option<usize>,
}

impl CliConfig {
    /// Merges the optional TOML file under the CLI flags (CLI wins) into the
    /// settings the engine consumes.
    pub fn resolve(&self) -> Result<RunSettings> {
        let file = match &self.config {
            Some(path) => Some(toml_config::TomlRunConfig::from_file(path)?),
            None => None,
        };
        let file = file.unwrap_or_default();

        let settings = RunSettings {
            program: self.program.clone(),
            memory_size: self
                .memory_size
                .or(file.memory_size)
                .unwrap_or(DEFAULT_MEMORY_SIZE),
            debug: self.debug || file.debug.unwrap_or(false),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_extension("program", &self.program, "asm")?;
        validate_path("program", &self.program)?;
        if let Some(size) = self.memory_size {
            validate_range("memory_size", size, MIN_MEMORY_SIZE, MAX_MEMORY_SIZE)?;
        }
        Ok(())
    }
}

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub program: String,
    pub memory_size: usize,
    pub debug: bool,
}

impl RunConfig for RunSettings {
    fn program_path(&self) -> &str {
        &self.program
    }

    fn memory_size(&self) -> usize {
        self.memory_size
    }

    fn debug(&self) -> bool {
        self.debug
    }
}

impl Validate for RunSettings {
    fn validate(&self) -> Result<()> {
        validate_range("memory_size", self.memory_size, MIN_MEMORY_SIZE, MAX_MEMORY_SIZE)
    }
}
