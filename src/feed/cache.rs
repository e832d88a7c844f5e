//! Caller-owned snapshot cache: (events, fetch instant, ttl).

use super::{Event, FeedSource};
use crate::error::Result;
use std::time::{Duration, Instant};
use tracing::{debug, info};

struct Snapshot {
    events: Vec<Event>,
    fetched_at: Instant,
}

pub struct FeedCache {
    ttl: Duration,
    entry: Option<Snapshot>,
}

impl FeedCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// True when nothing is cached or the snapshot is at least `ttl` old.
    pub fn is_stale(&self) -> bool {
        self.is_stale_at(Instant::now())
    }

    fn is_stale_at(&self, now: Instant) -> bool {
        match &self.entry {
            Some(s) => now.saturating_duration_since(s.fetched_at) >= self.ttl,
            None => true,
        }
    }

    pub fn snapshot(&self) -> Option<&[Event]> {
        self.entry.as_ref().map(|s| s.events.as_slice())
    }

    pub fn fetched_at(&self) -> Option<Instant> {
        self.entry.as_ref().map(|s| s.fetched_at)
    }

    /// Force the next `get_or_refresh` to refetch.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Return the cached snapshot, refetching first if stale. A failed fetch
    /// propagates and keeps the previous snapshot in place.
    pub fn get_or_refresh<S: FeedSource + ?Sized>(&mut self, source: &S) -> Result<&[Event]> {
        if self.is_stale() {
            let events = source.fetch()?;
            info!(count = events.len(), ttl_secs = self.ttl.as_secs(), "feed snapshot refreshed");
            self.entry = Some(Snapshot {
                events,
                fetched_at: Instant::now(),
            });
        } else {
            debug!("feed snapshot reused");
        }
        Ok(self.snapshot().unwrap_or(&[]))
    }
}
