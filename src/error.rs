//! Error types for log parsing, aggregation and input handling

use thiserror::Error;

/// Why a single log line was not turned into a record
///
/// Both variants are local to the line: the aggregation engine drops the
/// line and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line does not match the request log grammar")]
    Mismatch,

    #[error("QTime value is not a non-negative integer: {value:?}")]
    InvalidLatency { value: String },
}

/// Errors raised while building reports from aggregated statistics
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("no latencies recorded for core '{core}'")]
    EmptyStatistics { core: String },

    #[error("unknown core '{core}'")]
    UnknownCore { core: String },
}

/// Errors raised while opening or reading the input source
#[derive(Error, Debug)]
pub enum InputError {
    #[error("cannot open input '{path}'")]
    Unavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read input")]
    Read(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_latency_message_quotes_value() {
        let err = ParseError::InvalidLatency {
            value: "abc".to_string(),
        };
        assert!(err.to_string().contains("\"abc\""));
    }

    #[test]
    fn test_empty_statistics_names_core() {
        let err = StatsError::EmptyStatistics {
            core: "places".to_string(),
        };
        assert_eq!(err.to_string(), "no latencies recorded for core 'places'");
    }

    #[test]
    fn test_unavailable_input_keeps_source() {
        use std::error::Error as _;

        let err = InputError::Unavailable {
            path: "missing.log".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "cannot open input 'missing.log'");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_read_error_message_leaves_cause_to_source() {
        use std::error::Error as _;

        let err = InputError::from(std::io::Error::new(
            std::io::ErrorKind::Other,
            "Is a directory",
        ));
        assert_eq!(err.to_string(), "failed to read input");
        assert_eq!(err.source().unwrap().to_string(), "Is a directory");
    }
}
