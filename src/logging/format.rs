//! JSON log lines: one JSON object per line (ndjson) for ingestion and audit.

use crate::enrich::PipelineOutput;
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Outcome of one refresh → filter → enrich cycle.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub ts: String,
    pub cycle: u64,
    pub fetched: usize,
    pub working_set: usize,
    pub clusters: usize,
    pub anomalies: usize,
    pub days: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_place: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_path: Option<&'a str>,
}

impl<'a> RunReport<'a> {
    pub fn new(cycle: u64, fetched: usize, output: &'a PipelineOutput) -> Self {
        Self {
            ts: chrono::Utc::now().to_rfc3339(),
            cycle,
            fetched,
            working_set: output.summary.total,
            clusters: output.summary.clusters_detected,
            anomalies: output.summary.anomalies,
            days: output.daily.len(),
            top_place: output.summary.top_places.first().map(|p| p.place.as_str()),
            export_path: None,
        }
    }
}

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install global subscriber writing to stderr, level from RUST_LOG or default.
    pub fn init(json: bool, default_level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    /// Emit a single structured line (e.g. the run report) without going through tracing
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) {
        if let Ok(line) = serde_json::to_string(event) {
            let _ = writeln!(w, "{}", line);
        }
    }
}
