use crate::utils::error::{AsmError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Register-name grammar accepted by the parser and the register files.
static REGISTER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$([tsvak]\d+|zero|at|ra|sp|fp|gp|hi|lo|f\d+|cp0_\d+)$")
        .expect("register name pattern is valid")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn is_valid_register_name(name: &str) -> bool {
    REGISTER_NAME.is_match(name)
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AsmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if !Path::new(path).is_file() {
        return Err(AsmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "File does not exist".to_string(),
        });
    }

    Ok(())
}

pub fn validate_extension(field_name: &str, path: &str, expected: &str) -> Result<()> {
    let actual = Path::new(path).extension().and_then(|ext| ext.to_str());
    if actual != Some(expected) {
        return Err(AsmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: format!("Expected a .{} file", expected),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AsmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_register_name_grammar() {
        for name in ["$t0", "$t31", "$v5", "$a7", "$s3", "$k1", "$zero", "$at", "$ra", "$sp", "$fp", "$gp", "$hi", "$lo", "$f12", "$cp0_14"] {
            assert!(is_valid_register_name(name), "{} should be accepted", name);
        }
        for name in ["t0", "$x1", "$t", "$f", "$zero2", "$cp0", "$ra1"] {
            assert!(!is_valid_register_name(name), "{} should be rejected", name);
        }
    }

    #[test]
    fn test_validate_extension() {
        assert!(validate_extension("program", "fib.asm", "asm").is_ok());
        assert!(validate_extension("program", "fib.txt", "asm").is_err());
        assert!(validate_extension("program", "fib", "asm").is_err());
    }

    #[test]
    fn test_validate_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ".data").unwrap();
        assert!(validate_path("program", file.path().to_str().unwrap()).is_ok());
        assert!(validate_path("program", "").is_err());
        assert!(validate_path("program", "/nonexistent/nowhere.asm").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("memory_size", 1024, 64, 4096).is_ok());
        assert!(validate_range("memory_size", 16, 64, 4096).is_err());
        assert!(validate_range("memory_size", 8192, 64, 4096).is_err());
    }
}
