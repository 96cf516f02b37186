//! Per-core report construction and text rendering
//!
//! Ranked lists are deterministic: value descending, then key ascending.
//! Percentiles are index-based, taking the value at ascending position
//! `floor(n * p)` with no interpolation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default number of entries in each ranked list
pub const DEFAULT_TOP_N: usize = 10;

/// Percentiles reported for every core, as (label, fraction)
pub const PERCENTILES: [(&str, f64); 4] = [
    ("Median", 0.5),
    ("75%", 0.75),
    ("90%", 0.90),
    ("99%", 0.99),
];

const SECTION_RULE_WIDTH: usize = 40;
const CORE_DIVIDER_WIDTH: usize = 100;

/// One entry of a ranked list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub key: String,
    pub value: u64,
}

/// Index-based latency percentiles for one core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub median: u64,
    pub p75: u64,
    pub p90: u64,
    pub p99: u64,
}

impl LatencySummary {
    /// Compute the summary from unsorted values
    ///
    /// Returns `None` when `values` is empty.
    pub fn from_values(values: &[u64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_unstable();

        Some(Self {
            median: percentile(&sorted, PERCENTILES[0].1)?,
            p75: percentile(&sorted, PERCENTILES[1].1)?,
            p90: percentile(&sorted, PERCENTILES[2].1)?,
            p99: percentile(&sorted, PERCENTILES[3].1)?,
        })
    }

    /// Rows in display order, labelled as in [`PERCENTILES`]
    pub fn rows(&self) -> [(&'static str, u64); 4] {
        [
            (PERCENTILES[0].0, self.median),
            (PERCENTILES[1].0, self.p75),
            (PERCENTILES[2].0, self.p90),
            (PERCENTILES[3].0, self.p99),
        ]
    }
}

/// Index used for fraction `p` of `n` sorted values: `floor(n * p)`
///
/// Clamped to the last element so fractions at or above 1.0 stay in bounds.
pub fn percentile_index(n: usize, p: f64) -> usize {
    let index = (n as f64 * p).floor() as usize;
    index.min(n.saturating_sub(1))
}

/// Value at fraction `p` of ascending-sorted data, `None` when empty
pub fn percentile(sorted: &[u64], p: f64) -> Option<u64> {
    if sorted.is_empty() {
        return None;
    }
    sorted.get(percentile_index(sorted.len(), p)).copied()
}

/// Top `n` entries of a table, value descending then key ascending
pub fn top_n(table: &HashMap<String, u64>, n: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<(&String, &u64)> = table.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    entries
        .into_iter()
        .take(n)
        .map(|(key, value)| RankedEntry {
            key: key.clone(),
            value: *value,
        })
        .collect()
}

/// Finished statistics for one core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreReport {
    /// Core name
    pub core: String,
    /// Matched lines attributed to this core
    pub line_count: u64,
    /// Most requested handler paths
    pub top_endpoints: Vec<RankedEntry>,
    /// Most frequent distinct search strings
    pub top_search_urls: Vec<RankedEntry>,
    /// Search strings ranked by their last seen QTime
    pub slowest_searches: Vec<RankedEntry>,
    /// Percentiles over the last seen QTime of each distinct search string
    pub latency: LatencySummary,
}

impl CoreReport {
    /// Render this report as the plain-text block used by the default output
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        render_ranked(
            &mut out,
            &format!("Top Endpoints for {}", self.core),
            &self.top_endpoints,
        );
        render_ranked(
            &mut out,
            &format!("Top Search URLs for {}", self.core),
            &self.top_search_urls,
        );
        render_ranked(
            &mut out,
            &format!("Slowest Searches for {}", self.core),
            &self.slowest_searches,
        );

        out.push_str(&format!("Search Time for {}\n", self.core));
        out.push_str(&format!("{}\n", "=".repeat(SECTION_RULE_WIDTH)));
        out.push('\n');
        for (label, value) in self.latency.rows() {
            out.push_str(&format!("{}     {}\n", label, value));
        }
        out.push('\n');
        out.push_str(&format!("{}\n", "*".repeat(CORE_DIVIDER_WIDTH)));
        out.push('\n');

        out
    }
}

fn render_ranked(out: &mut String, title: &str, entries: &[RankedEntry]) {
    out.push_str(&format!("{}\n", title));
    out.push_str(&format!("{}\n", "=".repeat(SECTION_RULE_WIDTH)));
    for (index, entry) in entries.iter().enumerate() {
        out.push_str(&format!("{}) \"{}\" {}\n", index + 1, entry.key, entry.value));
    }
    out.push('\n');
}

/// Render every report, in order, as one text document
pub fn render_text(reports: &[CoreReport]) -> String {
    reports.iter().map(CoreReport::to_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u64)]) -> HashMap<String, u64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_percentiles_of_four_values() {
        let summary = LatencySummary::from_values(&[16, 2, 11, 5]).unwrap();
        assert_eq!(summary.median, 11);
        assert_eq!(summary.p75, 16);
        assert_eq!(summary.p90, 16);
        assert_eq!(summary.p99, 16);
    }

    #[test]
    fn test_percentiles_of_single_value() {
        let summary = LatencySummary::from_values(&[7]).unwrap();
        assert_eq!(summary.rows().map(|(_, v)| v), [7, 7, 7, 7]);
    }

    #[test]
    fn test_percentiles_of_two_values() {
        // floor(2 * 0.5) = 1, so the median is the larger value
        let summary = LatencySummary::from_values(&[3, 9]).unwrap();
        assert_eq!(summary.median, 9);
        assert_eq!(summary.p75, 9);
    }

    #[test]
    fn test_percentiles_of_hundred_values() {
        let values: Vec<u64> = (0..100).collect();
        let summary = LatencySummary::from_values(&values).unwrap();
        assert_eq!(summary.median, 50);
        assert_eq!(summary.p75, 75);
        assert_eq!(summary.p90, 90);
        assert_eq!(summary.p99, 99);
    }

    #[test]
    fn test_percentiles_of_empty_values() {
        assert!(LatencySummary::from_values(&[]).is_none());
        assert_eq!(percentile(&[], 0.5), None);
    }

    #[test]
    fn test_percentile_index_rule() {
        assert_eq!(percentile_index(4, 0.5), 2);
        assert_eq!(percentile_index(4, 0.75), 3);
        assert_eq!(percentile_index(4, 0.9), 3);
        assert_eq!(percentile_index(4, 0.99), 3);
        assert_eq!(percentile_index(10, 0.9), 9);
        assert_eq!(percentile_index(3, 1.0), 2);
    }

    #[test]
    fn test_top_n_orders_by_value_then_key() {
        let t = table(&[("/b", 3), ("/a", 3), ("/c", 5), ("/d", 1)]);
        let keys: Vec<String> = top_n(&t, 10).into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["/c", "/a", "/b", "/d"]);
    }

    #[test]
    fn test_top_n_truncates() {
        let t: HashMap<String, u64> = (0..25).map(|i| (format!("k{:02}", i), i)).collect();
        let top = top_n(&t, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].key, "k24");
        assert_eq!(top[9].key, "k15");
    }

    #[test]
    fn test_top_n_of_empty_table() {
        assert!(top_n(&HashMap::new(), 10).is_empty());
    }

    #[test]
    fn test_text_rendering_layout() {
        let report = CoreReport {
            core: "places".to_string(),
            line_count: 2,
            top_endpoints: vec![RankedEntry {
                key: "/select/".to_string(),
                value: 2,
            }],
            top_search_urls: vec![RankedEntry {
                key: "q=*".to_string(),
                value: 2,
            }],
            slowest_searches: vec![RankedEntry {
                key: "q=*".to_string(),
                value: 7,
            }],
            latency: LatencySummary {
                median: 7,
                p75: 7,
                p90: 7,
                p99: 7,
            },
        };

        let text = report.to_text();
        assert!(text.starts_with("Top Endpoints for places\n========================================\n1) \"/select/\" 2\n\n"));
        assert!(text.contains("Top Search URLs for places\n"));
        assert!(text.contains("Slowest Searches for places\n"));
        assert!(text.contains("1) \"q=*\" 7\n"));
        assert!(text.contains("Search Time for places\n"));
        assert!(text.contains("Median     7\n75%     7\n90%     7\n99%     7\n"));
        assert!(text.ends_with(&format!("{}\n\n", "*".repeat(100))));

        let endpoints = text.find("Top Endpoints").unwrap();
        let urls = text.find("Top Search URLs").unwrap();
        let slowest = text.find("Slowest Searches").unwrap();
        let times = text.find("Search Time").unwrap();
        assert!(endpoints < urls && urls < slowest && slowest < times);
    }

    #[test]
    fn test_render_text_of_no_reports() {
        assert_eq!(render_text(&[]), "");
    }
}
