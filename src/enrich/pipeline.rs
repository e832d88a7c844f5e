//! Enrichment pipeline: working set → clusters → severity → anomalies → daily counts.

use super::anomaly::AnomalyDetector;
use super::cluster::{cluster_events, DbscanParams};
use super::daily::{aggregate_daily, DailyCount};
use super::severity::score_events;
use super::summary::Summary;
use crate::config::{AnomalyConfig, ClusterConfig};
use crate::feed::Event;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub events: Vec<Event>,
    pub daily: Vec<DailyCount>,
    pub summary: Summary,
}

pub struct EnrichmentPipeline {
    cluster: DbscanParams,
    anomaly: AnomalyDetector,
}

impl EnrichmentPipeline {
    pub fn new(cluster: &ClusterConfig, anomaly: &AnomalyConfig) -> Self {
        Self {
            cluster: DbscanParams::from(cluster),
            anomaly: AnomalyDetector::new(anomaly),
        }
    }

    /// Run every stage over `events` in place. Each call recomputes from
    /// scratch; nothing carries over between working sets.
    pub fn run(&self, mut events: Vec<Event>) -> PipelineOutput {
        cluster_events(&mut events, self.cluster);
        score_events(&mut events);
        self.anomaly.detect(&mut events);
        let daily = aggregate_daily(&events);
        let summary = Summary::from_events(&events);

        info!(
            events = summary.total,
            clusters = summary.clusters_detected,
            anomalies = summary.anomalies,
            days = daily.len(),
            z_threshold = self.anomaly.threshold(),
            "enrichment complete"
        );
        PipelineOutput {
            events,
            daily,
            summary,
        }
    }
}

impl Default for EnrichmentPipeline {
    fn default() -> Self {
        Self::new(&ClusterConfig::default(), &AnomalyConfig::default())
    }
}
