//! Derived analytics over the working set. Every stage is a pure pass over
//! the events it is given and degrades to a no-op on empty input.

pub mod anomaly;
pub mod cluster;
pub mod daily;
mod pipeline;
pub mod severity;
pub mod summary;

pub use anomaly::{detect_anomalies, AnomalyDetector};
pub use cluster::{cluster_events, DbscanParams, NOISE};
pub use daily::{aggregate_daily, DailyCount};
pub use pipeline::{EnrichmentPipeline, PipelineOutput};
pub use severity::{score_events, Severity};
pub use summary::{cluster_label, Summary};
