#![no_main]

use libfuzzer_sys::fuzz_target;
use solrstat::AggregationEngine;

fuzz_target!(|data: &[u8]| {
    // Same lossy decoding the binary applies to input lines
    let input = String::from_utf8_lossy(data);

    let mut engine = AggregationEngine::new();
    engine.ingest(input.lines());

    // Every core that exists has at least one latency
    assert!(engine.reports(10).is_ok());
});
