//! solrstat - per-core statistics from search-service request logs
//!
//! This library parses `INFO: [core] webapp=... path=... params={...}` request
//! lines and aggregates them per core into endpoint counts, search string
//! counts and index-based latency percentiles.

pub mod cli;
pub mod csv_output;
pub mod error;
pub mod input;
pub mod json_output;
pub mod parser;
pub mod report;
pub mod stats;

pub use error::{InputError, ParseError, StatsError};
pub use parser::{LineParser, LogRecord};
pub use report::{CoreReport, LatencySummary, RankedEntry};
pub use stats::{AggregationEngine, CoreStats, IngestSummary};
