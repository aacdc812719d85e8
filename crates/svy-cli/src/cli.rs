//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "svy",
    version,
    about = "Survey label studio - load labeled survey data and tabulate it",
    long_about = "Load survey response data together with its label-language \
                  metadata file,\nexpand multi-response groups into indicator \
                  columns, and derive weighted\nfrequency tables and \
                  descriptive statistics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a survey and summarize its variables.
    Inspect(LoadArgs),

    /// Weighted frequency table for one variable.
    Freq(TabulateArgs),

    /// Weighted descriptive statistics for one numeric variable.
    Stats(TabulateArgs),
}

#[derive(Parser)]
pub struct LoadArgs {
    /// Path to the survey response file (.csv, .txt, .xlsx, .xls, .ods).
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Path to the companion label-language metadata file.
    #[arg(value_name = "METADATA")]
    pub metadata: PathBuf,
}

#[derive(Parser)]
pub struct TabulateArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Variable (column) to tabulate.
    #[arg(long = "variable", value_name = "VAR")]
    pub variable: String,

    /// Weight column.
    #[arg(long = "weight", value_name = "COL", default_value = "vigt")]
    pub weight: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
