//! Tracing setup and one-line JSON run reports.

mod format;

pub use format::{RunReport, StructuredLogger};
