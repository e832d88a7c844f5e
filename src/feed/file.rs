//! GeoJSON feed read from disk (offline runs, fixtures).

use super::{parse_feed, Event, FeedSource};
use crate::error::Result;
use std::path::PathBuf;
use tracing::info;

pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedSource for FileFeedSource {
    fn fetch(&self) -> Result<Vec<Event>> {
        let body = std::fs::read_to_string(&self.path)?;
        let events = parse_feed(&body)?;
        info!(path = %self.path.display(), count = events.len(), "loaded feed file");
        Ok(events)
    }
}
