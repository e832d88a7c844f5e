//! Headline numbers for the enriched working set.

use super::cluster::NOISE;
use crate::feed::Event;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub const TOP_PLACES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceCount {
    pub place: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    /// Distinct cluster ids, noise excluded
    pub clusters_detected: usize,
    pub anomalies: usize,
    pub top_places: Vec<PlaceCount>,
}

impl Summary {
    pub fn from_events(events: &[Event]) -> Self {
        let clusters: BTreeSet<i32> = events
            .iter()
            .filter_map(|e| e.cluster)
            .filter(|&c| c != NOISE)
            .collect();
        Self {
            total: events.len(),
            clusters_detected: clusters.len(),
            anomalies: events.iter().filter(|e| e.anomaly == Some(true)).count(),
            top_places: top_places(events, TOP_PLACES),
        }
    }
}

/// Most frequent places, ties broken by first appearance.
pub fn top_places(events: &[Event], limit: usize) -> Vec<PlaceCount> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for e in events {
        let c = counts.entry(e.place.as_str()).or_insert_with(|| {
            order.push(e.place.as_str());
            0
        });
        *c += 1;
    }
    let mut ranked: Vec<PlaceCount> = order
        .into_iter()
        .map(|place| PlaceCount {
            place: place.to_string(),
            count: counts[place],
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

/// Legend label for a cluster id.
pub fn cluster_label(cluster: i32) -> String {
    if cluster == NOISE {
        "Noise".to_string()
    } else {
        cluster.to_string()
    }
}
