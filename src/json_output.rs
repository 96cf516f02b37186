//! JSON output format for core reports
//!
//! `--format json` implementation

use serde::{Deserialize, Serialize};

use crate::report::CoreReport;

/// Totals across every core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    /// Lines consumed from the input
    pub lines_read: u64,
    /// Lines that matched the request grammar
    pub lines_matched: u64,
    /// Number of distinct cores
    pub cores: usize,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// One report per core, ordered by core name
    pub cores: Vec<CoreReport>,
    /// Ingestion totals
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Create a new JSON output structure
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "solrstat-json-v1".to_string(),
            cores: Vec::new(),
            summary: JsonSummary {
                lines_read: 0,
                lines_matched: 0,
                cores: 0,
            },
        }
    }

    /// Add a core report to the output
    pub fn add_core(&mut self, report: CoreReport) {
        self.summary.cores += 1;
        self.cores.push(report);
    }

    /// Record ingestion totals
    pub fn set_line_counts(&mut self, lines_read: u64, lines_matched: u64) {
        self.summary.lines_read = lines_read;
        self.summary.lines_matched = lines_matched;
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}
