//! Command-line parsing for the property-declaration audit.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the screening code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{OutputFormat, RiskLevel};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pega", version, about = "Property declaration fraud screen")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Screen the data file(s) and print counts, market reference and flagged properties.
    Analyze(AnalyzeArgs),
    /// Print counts and market reference only (no findings table).
    Summary(AnalyzeArgs),
}

/// Options shared by all commands.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// JSON data file(s) to screen. Repeatable.
    ///
    /// When omitted, `DATA_PATH` (environment or `.env`), the container path
    /// and `data/bens-imoveis.json` are tried in that order.
    #[arg(short = 'd', long = "data", value_name = "JSON")]
    pub data: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Only keep findings at or above this risk level.
    #[arg(long, value_enum, default_value_t = RiskLevel::Baixo)]
    pub min_risk: RiskLevel,

    /// Only keep findings whose location, registration or reasons contain this text.
    #[arg(long)]
    pub filter: Option<String>,

    /// Maximum rows in the findings table.
    #[arg(long, default_value_t = 50)]
    pub top: usize,

    /// Export the (filtered) findings to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}
