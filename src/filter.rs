//! Working-set selection by magnitude, calendar date and depth.

use crate::config::FilterConfig;
use crate::feed::Event;
use chrono::NaiveDate;

/// Inclusive ranges; `None` leaves that axis unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterRanges {
    pub magnitude: Option<(f64, f64)>,
    pub date: Option<(NaiveDate, NaiveDate)>,
    pub depth: Option<(f64, f64)>,
}

fn within<T: PartialOrd>(value: T, range: Option<(T, T)>) -> bool {
    match range {
        Some((lo, hi)) => lo <= value && value <= hi,
        None => true,
    }
}

impl FilterRanges {
    pub fn matches(&self, event: &Event) -> bool {
        within(event.magnitude, self.magnitude)
            && within(event.time.date_naive(), self.date)
            && within(event.depth_km, self.depth)
    }

    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        events.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

impl From<&FilterConfig> for FilterRanges {
    fn from(c: &FilterConfig) -> Self {
        Self {
            magnitude: c.magnitude,
            date: c.date,
            depth: c.depth,
        }
    }
}
