/// Ordered collector for non-aborting errors and warnings. The parser and
/// the evaluator accumulate into the same report, presented once at the end
/// of the run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn report(&self) {
        tracing::info!("=== Execution Report ===");
        if self.errors.is_empty() && self.warnings.is_empty() {
            tracing::info!("Status: Success - No issues detected");
        } else {
            if !self.errors.is_empty() {
                tracing::error!("Errors found:");
                for error in &self.errors {
                    tracing::error!("- {}", error);
                }
            }
            if !self.warnings.is_empty() {
                tracing::warn!("Warnings found:");
                for warning in &self.warnings {
                    tracing::warn!("- {}", warning);
                }
            }
        }
        tracing::info!("========================");
    }
}
