//! CSV output format for core reports
//!
//! One row per ranked entry or percentile, for spreadsheet analysis

use crate::report::{CoreReport, RankedEntry};

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    reports: Vec<CoreReport>,
}

impl CsvOutput {
    /// Create a new CSV output formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a core report to the output
    pub fn add_core(&mut self, report: CoreReport) {
        self.reports.push(report);
    }

    fn header() -> &'static str {
        "core,section,rank,key,value"
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn push_ranked(output: &mut String, core: &str, section: &str, entries: &[RankedEntry]) {
        for (index, entry) in entries.iter().enumerate() {
            output.push_str(&format!(
                "{},{},{},{},{}\n",
                Self::escape_field(core),
                section,
                index + 1,
                Self::escape_field(&entry.key),
                entry.value
            ));
        }
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(Self::header());
        output.push('\n');

        for report in &self.reports {
            let core = report.core.as_str();
            Self::push_ranked(&mut output, core, "endpoint", &report.top_endpoints);
            Self::push_ranked(&mut output, core, "search_url", &report.top_search_urls);
            Self::push_ranked(&mut output, core, "slowest_search", &report.slowest_searches);

            for (rank, (label, value)) in report.latency.rows().iter().enumerate() {
                output.push_str(&format!(
                    "{},latency,{},{},{}\n",
                    Self::escape_field(core),
                    rank + 1,
                    label,
                    value
                ));
            }
        }

        output
    }
}
