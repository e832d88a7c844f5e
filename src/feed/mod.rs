//! Feed loading: USGS GeoJSON summary feed → flat event records.
//! Sources (HTTP, file) share one parser; the cache bounds refetch frequency.

mod cache;
mod file;
mod http;

pub use cache::FeedCache;
pub use file::FileFeedSource;
pub use http::HttpFeedSource;

use crate::enrich::Severity;
use crate::error::{QuakeError, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One seismic event. Field order is the CSV export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub place: String,
    pub magnitude: f64,
    #[serde(with = "time_format")]
    pub time: DateTime<Utc>,
    pub longitude: f64,
    pub latitude: f64,
    pub depth_km: f64,
    /// Density cluster id, -1 for noise
    pub cluster: Option<i32>,
    pub severity_score: Option<f64>,
    pub severity: Option<Severity>,
    pub mag_zscore: Option<f64>,
    pub anomaly: Option<bool>,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        place: impl Into<String>,
        magnitude: f64,
        time: DateTime<Utc>,
        longitude: f64,
        latitude: f64,
        depth_km: f64,
    ) -> Self {
        Self {
            id: id.into(),
            place: place.into(),
            magnitude,
            time,
            longitude,
            latitude,
            depth_km,
            cluster: None,
            severity_score: None,
            severity: None,
            mag_zscore: None,
            anomaly: None,
        }
    }
}

/// Anything that yields the current set of raw events.
pub trait FeedSource {
    fn fetch(&self) -> Result<Vec<Event>>;
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    id: Option<String>,
    #[serde(default)]
    properties: Properties,
    geometry: Option<Geometry>,
}

#[derive(Deserialize, Default)]
struct Properties {
    place: Option<String>,
    mag: Option<f64>,
    time: Option<i64>,
}

#[derive(Deserialize)]
struct Geometry {
    coordinates: Option<Vec<f64>>,
}

/// Parse a GeoJSON FeatureCollection. Any feature lacking id, time or a
/// three-element coordinate tuple fails the whole document. Events with a
/// missing or non-positive magnitude are dropped.
pub fn parse_feed(body: &str) -> Result<Vec<Event>> {
    let collection: FeatureCollection = serde_json::from_str(body)?;
    let total = collection.features.len();
    let mut events = Vec::with_capacity(total);

    for (index, feature) in collection.features.into_iter().enumerate() {
        let id = feature.id.ok_or(QuakeError::MissingField { index, field: "id" })?;
        let millis = feature
            .properties
            .time
            .ok_or(QuakeError::MissingField { index, field: "time" })?;
        let coords = feature
            .geometry
            .and_then(|g| g.coordinates)
            .filter(|c| c.len() >= 3)
            .ok_or(QuakeError::MissingField {
                index,
                field: "coordinates",
            })?;
        let time = Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or(QuakeError::InvalidTime { index, millis })?;

        let Some(magnitude) = feature.properties.mag.filter(|m| *m > 0.0) else {
            continue;
        };

        events.push(Event::new(
            id,
            feature.properties.place.unwrap_or_default(),
            magnitude,
            time,
            coords[0],
            coords[1],
            coords[2],
        ));
    }

    debug!(total, kept = events.len(), "parsed feed");
    Ok(events)
}

/// `YYYY-MM-DD HH:MM:SS.fff` in UTC.
pub mod time_format {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const WRITE: &str = "%Y-%m-%d %H:%M:%S%.3f";
    const READ: &str = "%Y-%m-%d %H:%M:%S%.f";

    pub fn serialize<S: Serializer>(t: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format(WRITE))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        let naive = NaiveDateTime::parse_from_str(&raw, READ).map_err(serde::de::Error::custom)?;
        Ok(Utc.from_utc_datetime(&naive))
    }
}
