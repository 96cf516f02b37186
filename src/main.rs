use anyhow::Result;
use clap::Parser;
use solrstat::{
    cli::{Cli, OutputFormat, ReportConfig},
    csv_output::CsvOutput,
    input::{self, LineSource},
    json_output::JsonOutput,
    report, AggregationEngine, CoreReport, IngestSummary,
};
use std::io::BufRead;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Feed every input line into the engine, stopping on the first read error
fn ingest_all<R: BufRead>(
    engine: &mut AggregationEngine,
    source: LineSource<R>,
) -> Result<IngestSummary> {
    let mut read_error = None;
    let lines = source.map_while(|line| line.map_err(|e| read_error = Some(e)).ok());
    let summary = engine.ingest(lines);

    if let Some(e) = read_error {
        return Err(e.into());
    }
    Ok(summary)
}

/// Render reports in the configured format
fn render(
    reports: Vec<CoreReport>,
    summary: IngestSummary,
    format: OutputFormat,
) -> Result<String> {
    let rendered = match format {
        OutputFormat::Text => report::render_text(&reports),
        OutputFormat::Json => {
            let mut output = JsonOutput::new();
            output.set_line_counts(summary.lines_read, summary.lines_matched);
            for report in reports {
                output.add_core(report);
            }
            output.to_json()? + "\n"
        }
        OutputFormat::Csv => {
            let mut output = CsvOutput::new();
            for report in reports {
                output.add_core(report);
            }
            output.to_csv()
        }
    };
    Ok(rendered)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = ReportConfig::from(&args);

    // Open before touching the engine so a missing file fails fast
    let reader = input::open_source(args.input.as_deref())?;

    let mut engine = AggregationEngine::new();
    let summary = ingest_all(&mut engine, LineSource::new(reader))?;

    let reports = engine.reports(config.top_n)?;
    print!("{}", render(reports, summary, config.format)?);

    Ok(())
}
