//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the analysis pipeline
//! - prints tables or the JSON envelope
//! - writes optional exports
//! - maps the envelope status to an exit code

use chrono::Local;
use clap::Parser;

use crate::cli::{AnalyzeArgs, Command};
use crate::domain::{AnalysisConfig, OutputFormat};
use crate::error::{AppError, EXIT_INPUT, EXIT_NO_DATA, EXIT_OUTPUT};
use crate::report::{AnalysisEnvelope, EnvelopeStatus};

pub mod pipeline;

/// Entry point for the `pega` binary.
pub fn run() -> Result<(), AppError> {
    // `pega` and `pega --data x.json` behave like `pega analyze ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args, OutputMode::Full),
        Command::Summary(args) => handle_analyze(args, OutputMode::SummaryOnly),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    SummaryOnly,
}

fn handle_analyze(args: AnalyzeArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args);
    let run = pipeline::run_analysis(&config);
    let envelope = &run.envelope;

    match config.format {
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(envelope).map_err(|e| {
                AppError::new(EXIT_OUTPUT, format!("Failed to serialize envelope: {e}"))
            })?;
            println!("{text}");
        }
        OutputFormat::Table if envelope.status == EnvelopeStatus::Sucesso => {
            println!(
                "{}",
                crate::report::format_run_summary(&run.batches, &envelope.results, Local::now())
            );
            if mode == OutputMode::Full {
                println!(
                    "{}",
                    crate::report::format_findings_table(&envelope.results, config.top_n)
                );
            }
        }
        OutputFormat::Table => {}
    }

    if envelope.status == EnvelopeStatus::Sucesso {
        if let Some(path) = &config.export_csv {
            crate::io::export::write_findings_csv(path, &envelope.results)?;
            tracing::info!(
                path = %path.display(),
                rows = envelope.results.len(),
                "findings exported"
            );
        }
    }

    status_to_result(envelope)
}

fn status_to_result(envelope: &AnalysisEnvelope) -> Result<(), AppError> {
    let message = || crate::report::format_envelope_message(envelope);
    match envelope.status {
        EnvelopeStatus::Sucesso => Ok(()),
        EnvelopeStatus::Vazio => Err(AppError::new(EXIT_NO_DATA, message())),
        EnvelopeStatus::Erro => Err(AppError::new(EXIT_INPUT, message())),
    }
}

pub fn analysis_config_from_args(args: &AnalyzeArgs) -> AnalysisConfig {
    AnalysisConfig {
        data_paths: args.data.clone(),
        format: args.format,
        min_risk: args.min_risk,
        filter: args.filter.clone(),
        top_n: args.top,
        export_csv: args.export.clone(),
    }
}

/// Rewrite argv so `pega` defaults to `pega analyze`.
///
/// Rules:
/// - `pega`                      -> `pega analyze`
/// - `pega -d x.json ...`        -> `pega analyze -d x.json ...`
/// - `pega --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("analyze".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "summary");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "analyze flags".
    if arg1.starts_with('-') {
        argv.insert(1, "analyze".to_string());
        return argv;
    }

    argv
}
