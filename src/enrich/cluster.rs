//! Density-based spatial clustering (DBSCAN) over standardized latitude/longitude.
//!
//! Coordinates are re-standardized on every call, so neighborhoods are relative
//! to the spread of whatever subset is passed in. Cluster ids follow discovery
//! order and are not stable across different subsets.

use crate::config::ClusterConfig;
use crate::feed::Event;
use ndarray::Array2;
use tracing::debug;

/// Cluster id for points not density-reachable from any core point.
pub const NOISE: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DbscanParams {
    /// Neighborhood radius (inclusive)
    pub eps: f64,
    /// Points within `eps`, the point itself included, needed for a core point
    pub min_samples: usize,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            eps: 0.3,
            min_samples: 5,
        }
    }
}

impl From<&ClusterConfig> for DbscanParams {
    fn from(c: &ClusterConfig) -> Self {
        Self {
            eps: c.eps,
            min_samples: c.min_samples,
        }
    }
}

/// Per-column (x - mean) / std with population std. Constant columns become 0.
pub fn standardize(points: &Array2<f64>) -> Array2<f64> {
    let mut scaled = points.clone();
    for (col_idx, col) in points.columns().into_iter().enumerate() {
        let mean = col.mean().unwrap_or(0.0);
        let std = col.std(0.0);
        let first = col.iter().next().copied();
        let constant = col.iter().all(|&x| Some(x) == first);
        let mut out = scaled.column_mut(col_idx);
        if constant || std == 0.0 {
            out.fill(0.0);
        } else {
            out.mapv_inplace(|x| (x - mean) / std);
        }
    }
    scaled
}

fn region_query(points: &Array2<f64>, i: usize, eps_sq: f64) -> Vec<usize> {
    let p = points.row(i);
    points
        .rows()
        .into_iter()
        .enumerate()
        .filter(|(_, q)| {
            let d_sq: f64 = p.iter().zip(q.iter()).map(|(a, b)| (a - b).powi(2)).sum();
            d_sq <= eps_sq
        })
        .map(|(j, _)| j)
        .collect()
}

/// Label every row of `points`. Clusters grow from core points in row order;
/// a border point keeps the first cluster that reaches it.
pub fn dbscan(points: &Array2<f64>, params: DbscanParams) -> Vec<i32> {
    let n = points.nrows();
    let eps_sq = params.eps * params.eps;
    let neighborhoods: Vec<Vec<usize>> = (0..n).map(|i| region_query(points, i, eps_sq)).collect();
    let is_core: Vec<bool> = neighborhoods
        .iter()
        .map(|nb| nb.len() >= params.min_samples)
        .collect();

    let mut labels = vec![NOISE; n];
    let mut next_label = 0;
    let mut stack = Vec::new();

    for seed in 0..n {
        if labels[seed] != NOISE || !is_core[seed] {
            continue;
        }
        stack.push(seed);
        while let Some(v) = stack.pop() {
            if labels[v] != NOISE {
                continue;
            }
            labels[v] = next_label;
            if is_core[v] {
                stack.extend(neighborhoods[v].iter().copied().filter(|&j| labels[j] == NOISE));
            }
        }
        next_label += 1;
    }
    labels
}

/// Assign `cluster` on every event. Empty input is a no-op.
pub fn cluster_events(events: &mut [Event], params: DbscanParams) {
    if events.is_empty() {
        return;
    }
    let coords = Array2::from_shape_fn((events.len(), 2), |(i, j)| {
        if j == 0 {
            events[i].latitude
        } else {
            events[i].longitude
        }
    });
    let labels = dbscan(&standardize(&coords), params);
    for (event, label) in events.iter_mut().zip(labels) {
        event.cluster = Some(label);
    }
    debug!(
        events = events.len(),
        eps = params.eps,
        min_samples = params.min_samples,
        "clustered"
    );
}
