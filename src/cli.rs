//! CLI argument parsing for solrstat

use clap::{builder::TypedValueParser, Parser, ValueEnum};
use std::path::PathBuf;

use crate::report::DEFAULT_TOP_N;

/// Output format for core reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "solrstat")]
#[command(version)]
#[command(about = "Per-core endpoint, search and latency statistics from search request logs", long_about = None)]
pub struct Cli {
    /// File to parse; will read from stdin otherwise
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output format (text, json or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Number of entries in each ranked list
    #[arg(
        short = 'n',
        long = "top",
        value_name = "N",
        default_value_t = DEFAULT_TOP_N,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
    )]
    pub top: usize,

    /// Enable debug logging on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

/// Report settings assembled from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    pub top_n: usize,
    pub format: OutputFormat,
}

impl From<&Cli> for ReportConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            top_n: cli.top,
            format: cli.format,
        }
    }
}
