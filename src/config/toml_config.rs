use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Optional TOML run configuration; every field falls back to the CLI or
/// the built-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlRunConfig {
    pub memory_size: Option<usize>,
    pub debug: Option<bool>,
}

impl TomlRunConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
