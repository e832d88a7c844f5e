//! Error taxonomy for feed loading and export. Enrichment stages never fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuakeError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("feed parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("feature {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("feature {index} has out-of-range time {millis}")]
    InvalidTime { index: usize, millis: i64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, QuakeError>;
