//! Per-core request statistics
//!
//! The [`AggregationEngine`] folds parsed request lines into one
//! [`CoreStats`] per core name, then builds [`CoreReport`]s once the input
//! has been consumed.

use std::collections::HashMap;
use std::fmt;

use crate::error::StatsError;
use crate::parser::{LineParser, LogRecord};
use crate::report::{top_n, CoreReport, LatencySummary};

/// Statistics for a single core
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreStats {
    /// Core name
    pub name: String,
    /// Request count per handler path
    pub endpoint_counts: HashMap<String, u64>,
    /// Request count per distinct search string
    pub url_counts: HashMap<String, u64>,
    /// Latest QTime seen for each distinct search string
    ///
    /// NOTE: this is last-write-wins, not a list of every request's latency.
    /// Percentiles and "slowest searches" are therefore computed over distinct
    /// search strings, so a search repeated many times contributes a single
    /// value. This matches the established report semantics and is kept as is.
    pub qtime_by_url: HashMap<String, u64>,
    /// Matched lines attributed to this core
    pub line_count: u64,
}

impl CoreStats {
    /// Empty statistics for `name`
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Fold one record into the counters
    pub fn record(&mut self, record: LogRecord) {
        *self.endpoint_counts.entry(record.path).or_insert(0) += 1;
        *self
            .url_counts
            .entry(record.search_params.clone())
            .or_insert(0) += 1;
        self.line_count += 1;
        self.qtime_by_url.insert(record.search_params, record.qtime);
    }

    /// Percentiles over the recorded latencies
    pub fn latency_summary(&self) -> Result<LatencySummary, StatsError> {
        let values: Vec<u64> = self.qtime_by_url.values().copied().collect();
        LatencySummary::from_values(&values).ok_or_else(|| StatsError::EmptyStatistics {
            core: self.name.clone(),
        })
    }

    /// Build the report for this core with `n` entries per ranked list
    pub fn report(&self, n: usize) -> Result<CoreReport, StatsError> {
        let latency = self.latency_summary()?;

        Ok(CoreReport {
            core: self.name.clone(),
            line_count: self.line_count,
            top_endpoints: top_n(&self.endpoint_counts, n),
            top_search_urls: top_n(&self.url_counts, n),
            slowest_searches: top_n(&self.qtime_by_url, n),
            latency,
        })
    }
}

impl fmt::Display for CoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Core '{}' with {} endpoints {} search urls>",
            self.name,
            self.endpoint_counts.len(),
            self.url_counts.len()
        )
    }
}

/// Line counts from one ingestion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Lines consumed from the source
    pub lines_read: u64,
    /// Lines that parsed into a record
    pub lines_matched: u64,
}

impl IngestSummary {
    /// Lines that were skipped
    pub fn lines_skipped(&self) -> u64 {
        self.lines_read - self.lines_matched
    }
}

/// Accumulates request statistics keyed by core name
///
/// Single-threaded and single-pass: feed every line, then ask for reports.
/// Stopping early leaves the engine in a valid state to report on.
#[derive(Debug, Default)]
pub struct AggregationEngine {
    parser: LineParser,
    cores: HashMap<String, CoreStats>,
}

impl AggregationEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and fold every line; lines that do not parse are skipped
    pub fn ingest<I, S>(&mut self, lines: I) -> IngestSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = IngestSummary::default();
        for line in lines {
            summary.lines_read += 1;
            if self.ingest_line(line.as_ref()) {
                summary.lines_matched += 1;
            }
        }

        tracing::debug!(
            lines_read = summary.lines_read,
            lines_matched = summary.lines_matched,
            cores = self.cores.len(),
            "ingest finished"
        );
        summary
    }

    /// Parse and fold one line, returning whether it matched
    pub fn ingest_line(&mut self, line: &str) -> bool {
        match self.parser.try_parse(line) {
            Ok(record) => {
                self.record(record);
                true
            }
            Err(reason) => {
                tracing::trace!(%reason, "skipping line");
                false
            }
        }
    }

    /// Fold an already parsed record
    pub fn record(&mut self, record: LogRecord) {
        if let Some(stats) = self.cores.get_mut(&record.core) {
            stats.record(record);
            return;
        }

        let mut stats = CoreStats::new(&record.core);
        let core = record.core.clone();
        stats.record(record);
        self.cores.insert(core, stats);
    }

    /// Statistics for `core`, if any line matched it
    pub fn core(&self, core: &str) -> Option<&CoreStats> {
        self.cores.get(core)
    }

    /// All cores, ordered by name
    pub fn cores(&self) -> Vec<&CoreStats> {
        let mut cores: Vec<&CoreStats> = self.cores.values().collect();
        cores.sort_by(|a, b| a.name.cmp(&b.name));
        cores
    }

    /// Number of distinct cores seen
    pub fn len(&self) -> usize {
        self.cores.len()
    }

    /// True when no line has matched yet
    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    /// Report for one core with `n` entries per ranked list
    pub fn report(&self, core: &str, n: usize) -> Result<CoreReport, StatsError> {
        self.cores
            .get(core)
            .ok_or_else(|| StatsError::UnknownCore {
                core: core.to_string(),
            })?
            .report(n)
    }

    /// Reports for every core, ordered by core name
    pub fn reports(&self, n: usize) -> Result<Vec<CoreReport>, StatsError> {
        self.cores().into_iter().map(|stats| stats.report(n)).collect()
    }
}
