//! Dashboard configuration: feed endpoint and cache window, filter ranges,
//! clustering and anomaly parameters, export targets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const USGS_ALL_MONTH: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_month.geojson";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuakeConfig {
    /// Upstream feed and cache window
    pub feed: FeedConfig,
    /// Working-set selection applied before enrichment
    pub filter: FilterConfig,
    /// Density clustering parameters
    pub cluster: ClusterConfig,
    /// Magnitude outlier detection
    pub anomaly: AnomalyConfig,
    /// CSV outputs
    pub export: ExportConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// GeoJSON summary feed URL
    pub url: String,
    /// Read the feed from a local GeoJSON file instead of HTTP
    pub source_path: Option<PathBuf>,
    /// Snapshot lifetime before a refetch (seconds)
    pub cache_ttl_secs: u64,
    /// HTTP request timeout (seconds)
    pub timeout_secs: u64,
    /// Re-run the cycle at this interval; 0 runs once
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub magnitude: Option<(f64, f64)>,
    pub date: Option<(NaiveDate, NaiveDate)>,
    pub depth: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Neighborhood radius in standardized coordinate units
    pub eps: f64,
    /// Neighbors (self included) required for a core point
    pub min_samples: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingMagnitude {
    /// Leave missing magnitudes out of the mean and deviation
    #[default]
    Exclude,
    /// Count missing magnitudes as 0.0
    Zero,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    pub z_threshold: f64,
    pub missing_magnitude: MissingMagnitude,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub csv_path: Option<PathBuf>,
    pub daily_csv_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: USGS_ALL_MONTH.to_string(),
            source_path: None,
            cache_ttl_secs: 3600,
            timeout_secs: 30,
            refresh_interval_secs: 0,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            magnitude: Some((2.5, 6.0)),
            date: None,
            depth: Some((0.0, 300.0)),
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            eps: 0.3,
            min_samples: 5,
        }
    }
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            z_threshold: 2.5,
            missing_magnitude: MissingMagnitude::Exclude,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            csv_path: Some(PathBuf::from("filtered_earthquakes.csv")),
            daily_csv_path: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl QuakeConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(data) => match serde_json::from_str::<QuakeConfig>(&data) {
                    Ok(c) => return c,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "invalid config; using defaults")
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "unreadable config; using defaults")
                }
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let c: QuakeConfig = serde_json::from_str(r#"{"cluster": {"eps": 0.5}}"#).unwrap();
        assert_eq!(c.cluster.eps, 0.5);
        assert_eq!(c.cluster.min_samples, 5);
        assert_eq!(c.feed.cache_ttl_secs, 3600);
        assert_eq!(c.anomaly.missing_magnitude, MissingMagnitude::Exclude);
    }

    #[test]
    fn date_range_parses() {
        let c: QuakeConfig =
            serde_json::from_str(r#"{"filter": {"date": ["2024-01-01", "2024-01-31"]}}"#).unwrap();
        let (start, end) = c.filter.date.unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(c.filter.magnitude, Some((2.5, 6.0)));
        assert_eq!(c.filter.depth, Some((0.0, 300.0)));
    }
}
