//! Magnitude outliers by population z-score over the current working set.

use crate::config::{AnomalyConfig, MissingMagnitude};
use crate::feed::Event;
use tracing::debug;

pub const DEFAULT_Z_THRESHOLD: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Moments {
    mean: f64,
    std: f64,
    /// Every value identical; rounding in the mean can leave a tiny non-zero std
    constant: bool,
}

impl Moments {
    fn of(values: impl Iterator<Item = f64> + Clone) -> Option<Self> {
        let n = values.clone().count();
        if n == 0 {
            return None;
        }
        let first = values.clone().next()?;
        let constant = values.clone().all(|x| x == first);
        let mean = values.clone().sum::<f64>() / n as f64;
        let var = values.map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        Some(Self {
            mean,
            std: var.sqrt(),
            constant,
        })
    }

    fn z(&self, value: f64) -> f64 {
        if self.constant || self.std == 0.0 {
            0.0
        } else {
            (value - self.mean) / self.std
        }
    }
}

/// Population z-score of each value. A constant series scores 0 everywhere.
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    match Moments::of(values.iter().copied()) {
        Some(m) => values.iter().map(|&v| m.z(v)).collect(),
        None => Vec::new(),
    }
}

pub struct AnomalyDetector {
    threshold: f64,
    missing: MissingMagnitude,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_Z_THRESHOLD,
            missing: MissingMagnitude::Exclude,
        }
    }
}

impl AnomalyDetector {
    pub fn new(config: &AnomalyConfig) -> Self {
        Self {
            threshold: config.z_threshold,
            missing: config.missing_magnitude,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn effective(&self, magnitude: f64) -> Option<f64> {
        match (magnitude.is_nan(), self.missing) {
            (false, _) => Some(magnitude),
            (true, MissingMagnitude::Zero) => Some(0.0),
            (true, MissingMagnitude::Exclude) => None,
        }
    }

    /// Set `mag_zscore` and `anomaly` on every event. Excluded magnitudes get
    /// a NaN score and are never anomalous.
    pub fn detect(&self, events: &mut [Event]) {
        let values = events.iter().filter_map(|e| self.effective(e.magnitude));
        let Some(moments) = Moments::of(values) else {
            for event in events.iter_mut() {
                event.mag_zscore = Some(f64::NAN);
                event.anomaly = Some(false);
            }
            return;
        };

        let mut flagged = 0usize;
        for event in events.iter_mut() {
            let z = self
                .effective(event.magnitude)
                .map(|m| moments.z(m))
                .unwrap_or(f64::NAN);
            let anomaly = z > self.threshold;
            flagged += anomaly as usize;
            event.mag_zscore = Some(z);
            event.anomaly = Some(anomaly);
        }
        debug!(
            mean = moments.mean,
            std = moments.std,
            threshold = self.threshold,
            flagged,
            "anomaly scan"
        );
    }
}

pub fn detect_anomalies(events: &mut [Event], config: &AnomalyConfig) {
    AnomalyDetector::new(config).detect(events);
}
