//! quake-insight — earthquake feed enrichment for a single-user dashboard.
//!
//! Modular structure:
//! - [`feed`] — USGS GeoJSON loading (HTTP or file) and the snapshot cache
//! - [`filter`] — magnitude / date / depth working-set selection
//! - [`enrich`] — clustering, severity, anomalies, daily counts, summary
//! - [`export`] — CSV output of the enriched set and daily table
//! - [`logging`] — tracing setup and JSON run reports

pub mod config;
pub mod enrich;
pub mod error;
pub mod export;
pub mod feed;
pub mod filter;
pub mod logging;

pub use config::QuakeConfig;
pub use enrich::{DailyCount, EnrichmentPipeline, PipelineOutput, Severity, Summary};
pub use error::{QuakeError, Result};
pub use feed::{Event, FeedCache, FeedSource, FileFeedSource, HttpFeedSource};
pub use filter::FilterRanges;
pub use logging::StructuredLogger;
