use clap::Parser;
use mipsrun::utils::error::ErrorSeverity;
use mipsrun::utils::{logger, validation::Validate};
use mipsrun::{
    AsmError, CliConfig, Evaluator, ExitStatus, InstructionSet, RunConfig, RunSettings, StdConsole,
};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose || config.debug);

    tracing::info!("Starting mipsrun");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let settings = config.resolve()?;

    match run(settings).await {
        Ok(status) if status.is_success() => {
            tracing::info!("✅ Program finished");
        }
        Ok(status) => {
            tracing::warn!("Program exited with code {}", status.code);
            std::process::exit(status.code);
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

/// Parse, lay out data, evaluate on a blocking worker, report diagnostics.
async fn run(settings: RunSettings) -> mipsrun::Result<ExitStatus> {
    let mut parser = mipsrun::Parser::new();
    let program = parser.parse_file(Path::new(settings.program_path()))?;

    if parser.diagnostics().has_errors() {
        parser.diagnostics().report();
        return Err(AsmError::InvalidProgram {
            message: "program has structural errors".to_string(),
        });
    }

    let diagnostics = parser.into_diagnostics();
    let memory_size = settings.memory_size();
    let debug = settings.debug();

    // Evaluation is CPU-bound and may block on console reads.
    let (status, diagnostics) = tokio::task::spawn_blocking(move || {
        let mut evaluator = Evaluator::new(
            memory_size,
            debug,
            Box::new(StdConsole::new()),
            diagnostics,
        );
        evaluator.initialize_variables(&program.variables);
        let set = InstructionSet::standard();
        let status = evaluator.evaluate(&program.instructions, &set);
        (status, evaluator.into_diagnostics())
    })
    .await
    .map_err(|e| AsmError::EvaluationError {
        message: format!("evaluation task failed: {}", e),
    })?;

    diagnostics.report();

    if diagnostics.has_errors() && status.is_success() {
        return Ok(ExitStatus { code: 1 });
    }
    Ok(status)
}
