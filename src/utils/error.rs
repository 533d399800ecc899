use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsmError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid program structure: {message}")]
    InvalidProgram { message: String },

    #[error("Config file parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Memory access out of bounds: address={address} size={size}")]
    MemoryFault { address: i64, size: usize },

    #[error("Evaluation error: {message}")]
    EvaluationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Program,
    Memory,
    Evaluation,
}

impl AsmError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AsmError::IoError(_) => ErrorCategory::Io,
            AsmError::TomlParseError(_)
            | AsmError::InvalidConfigValueError { .. }
            | AsmError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AsmError::InvalidProgram { .. } => ErrorCategory::Program,
            AsmError::MemoryFault { .. } => ErrorCategory::Memory,
            AsmError::EvaluationError { .. } => ErrorCategory::Evaluation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AsmError::IoError(_) => ErrorSeverity::Critical,
            AsmError::TomlParseError(_)
            | AsmError::InvalidConfigValueError { .. }
            | AsmError::MissingConfigError { .. } => ErrorSeverity::Medium,
            AsmError::InvalidProgram { .. } => ErrorSeverity::High,
            AsmError::MemoryFault { .. } => ErrorSeverity::High,
            AsmError::EvaluationError { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AsmError::IoError(_) => {
                "Check that the program file exists and is readable".to_string()
            }
            AsmError::TomlParseError(_) => {
                "Check the TOML syntax of the configuration file".to_string()
            }
            AsmError::InvalidConfigValueError { field, .. } => {
                format!("Adjust the '{}' setting and retry", field)
            }
            AsmError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            AsmError::InvalidProgram { .. } => {
                "Fix the reported structural problems in the .asm source".to_string()
            }
            AsmError::MemoryFault { .. } => {
                "Check address computations against the configured memory size".to_string()
            }
            AsmError::EvaluationError { .. } => {
                "Run with --debug to trace the failing instruction".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AsmError::IoError(e) => format!("Could not read the program file: {}", e),
            AsmError::TomlParseError(e) => format!("Configuration file is not valid TOML: {}", e),
            AsmError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration '{}' is invalid: {}", field, reason)
            }
            AsmError::MissingConfigError { field } => {
                format!("Configuration '{}' is missing", field)
            }
            AsmError::InvalidProgram { message } => format!("Program rejected: {}", message),
            AsmError::MemoryFault { address, size } => format!(
                "Program touched memory outside the emulated region (address {}, {} bytes)",
                address, size
            ),
            AsmError::EvaluationError { message } => format!("Evaluation failed: {}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, AsmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_classification() {
        let config = AsmError::MissingConfigError {
            field: "program".to_string(),
        };
        assert_eq!(config.severity(), ErrorSeverity::Medium);
        assert_eq!(config.category(), ErrorCategory::Configuration);

        let fault = AsmError::MemoryFault {
            address: -4,
            size: 4,
        };
        assert_eq!(fault.severity(), ErrorSeverity::High);
        assert_eq!(fault.category(), ErrorCategory::Memory);
    }

    #[test]
    fn test_messages_name_the_field() {
        let err = AsmError::InvalidConfigValueError {
            field: "memory_size".to_string(),
            value: "0".to_string(),
            reason: "too small".to_string(),
        };
        assert!(err.user_friendly_message().contains("memory_size"));
        assert!(err.recovery_suggestion().contains("memory_size"));
    }
}
