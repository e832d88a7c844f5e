//! Severity score magnitude² / (depth_km + 1) and its fixed-threshold label.

use crate::feed::Event;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores strictly above this are Severe.
pub const SEVERE_ABOVE: f64 = 10.0;
/// Scores strictly above this (and not Severe) are Moderate.
pub const MODERATE_ABOVE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Light,
    Moderate,
    Severe,
}

impl Severity {
    pub fn from_score(score: f64) -> Self {
        if score > SEVERE_ABOVE {
            Severity::Severe
        } else if score > MODERATE_ABOVE {
            Severity::Moderate
        } else {
            Severity::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Light => "Light",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shallow, strong events score highest. Negative depth is not validated.
pub fn severity_score(magnitude: f64, depth_km: f64) -> f64 {
    magnitude.powi(2) / (depth_km + 1.0)
}

pub fn score_events(events: &mut [Event]) {
    for event in events.iter_mut() {
        let score = severity_score(event.magnitude, event.depth_km);
        event.severity_score = Some(score);
        event.severity = Some(Severity::from_score(score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ev(mag: f64, depth: f64) -> Event {
        let t = Utc.timestamp_millis_opt(0).unwrap();
        Event::new("e", "p", mag, t, 0.0, 0.0, depth)
    }

    #[test]
    fn score_formula() {
        let mut events = vec![ev(4.0, 0.0), ev(3.0, 2.0), ev(6.5, 9.0)];
        score_events(&mut events);
        assert_eq!(events[0].severity_score, Some(16.0));
        assert_eq!(events[1].severity_score, Some(3.0));
        assert_eq!(events[2].severity_score, Some(6.5 * 6.5 / 10.0));
        let labels: Vec<Severity> = events.iter().map(|e| e.severity.unwrap()).collect();
        assert_eq!(labels, vec![Severity::Severe, Severity::Light, Severity::Light]);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(Severity::from_score(10.0), Severity::Moderate);
        assert_eq!(Severity::from_score(10.000001), Severity::Severe);
        assert_eq!(Severity::from_score(5.0), Severity::Light);
        assert_eq!(Severity::from_score(5.000001), Severity::Moderate);
        assert_eq!(Severity::from_score(-3.0), Severity::Light);
    }

    #[test]
    fn negative_depth_inflates_score() {
        // depth -0.5 → denominator 0.5
        assert_eq!(severity_score(3.0, -0.5), 18.0);
    }

    #[test]
    fn labels_render_as_names() {
        assert_eq!(Severity::Severe.to_string(), "Severe");
        assert_eq!(serde_json::to_string(&Severity::Moderate).unwrap(), "\"Moderate\"");
    }

    #[test]
    fn empty_input() {
        let mut events: Vec<Event> = Vec::new();
        score_events(&mut events);
        assert!(events.is_empty());
    }
}
