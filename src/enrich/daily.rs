//! Daily event counts for trend charts.

use crate::feed::Event;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub quake_count: usize,
}

/// One row per UTC calendar date present in `events`, ascending. Days without
/// events produce no row.
pub fn aggregate_daily(events: &[Event]) -> Vec<DailyCount> {
    let mut by_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for event in events {
        *by_date.entry(event.time.date_naive()).or_default() += 1;
    }
    by_date
        .into_iter()
        .map(|(date, quake_count)| DailyCount { date, quake_count })
        .collect()
}
