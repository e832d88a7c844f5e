//! CSV export of the enriched working set and the daily table.

use crate::enrich::DailyCount;
use crate::error::Result;
use crate::feed::Event;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

/// Export column order; matches the field order of [`Event`].
pub const EVENT_COLUMNS: [&str; 12] = [
    "id",
    "place",
    "magnitude",
    "time",
    "longitude",
    "latitude",
    "depth_km",
    "cluster",
    "severity_score",
    "severity",
    "mag_zscore",
    "anomaly",
];

pub const DAILY_COLUMNS: [&str; 2] = ["date", "quake_count"];

/// Header is always written, so an empty working set still yields a valid file.
pub fn write_events<W: Write>(events: &[Event], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(EVENT_COLUMNS)?;
    for event in events {
        wtr.serialize(event)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_events<R: Read>(reader: R) -> Result<Vec<Event>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut events = Vec::new();
    for row in rdr.deserialize() {
        events.push(row?);
    }
    Ok(events)
}

/// In-memory CSV, e.g. for a download button.
pub fn events_to_csv(events: &[Event]) -> Result<String> {
    let mut buf = Vec::new();
    write_events(events, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn export_events(path: &Path, events: &[Event]) -> Result<()> {
    write_events(events, File::create(path)?)?;
    info!(path = %path.display(), rows = events.len(), "exported events");
    Ok(())
}

pub fn write_daily<W: Write>(daily: &[DailyCount], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(DAILY_COLUMNS)?;
    for row in daily {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_daily(path: &Path, daily: &[DailyCount]) -> Result<()> {
    write_daily(daily, File::create(path)?)?;
    info!(path = %path.display(), rows = daily.len(), "exported daily counts");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::{EnrichmentPipeline, Severity};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn enriched() -> Vec<Event> {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 15).unwrap();
        let mut events: Vec<Event> = (0..6)
            .map(|i| {
                Event::new(
                    format!("us{i}"),
                    format!("{i} km SW of Volcano, Hawaii"),
                    2.0 + i as f64 * 0.5,
                    t,
                    -155.2 + i as f64 * 0.001,
                    19.4,
                    i as f64,
                )
            })
            .collect();
        events.push(Event::new("far", "Fiji region, \"deep\"", 6.8, t, 178.0, -17.9, 0.0));
        EnrichmentPipeline::default().run(events).events
    }

    #[test]
    fn header_is_fixed() {
        let csv = events_to_csv(&[]).unwrap();
        assert_eq!(
            csv.trim_end(),
            "id,place,magnitude,time,longitude,latitude,depth_km,cluster,severity_score,severity,mag_zscore,anomaly"
        );
    }

    #[test]
    fn row_layout() {
        let events = enriched();
        let csv = events_to_csv(&events[..1]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("us0,\"0 km SW of Volcano, Hawaii\",2.0,2024-01-01 08:30:15.000,-155.2,19.4,0.0,"));
        let tail: Vec<&str> = row.rsplit(',').take(4).collect();
        assert_eq!(tail[0], "false");
        assert_eq!(tail[2], "Light");
        assert_eq!(tail[3], "4.0");
    }

    #[test]
    fn round_trip_preserves_labels() {
        let events = enriched();
        let csv = events_to_csv(&events).unwrap();
        let back = read_events(csv.as_bytes()).unwrap();
        assert_eq!(back.len(), events.len());
        for (a, b) in events.iter().zip(&back) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.place, b.place);
            assert_eq!(a.time, b.time);
            assert_eq!(a.cluster, b.cluster);
            assert_eq!(a.severity, b.severity);
            assert_eq!(a.anomaly, b.anomaly);
            assert!((a.severity_score.unwrap() - b.severity_score.unwrap()).abs() < 1e-9);
        }
        assert_eq!(back[6].severity, Some(Severity::Severe));
    }

    #[test]
    fn unenriched_fields_are_blank() {
        let t = Utc.timestamp_millis_opt(0).unwrap();
        let raw = vec![Event::new("a", "p", 1.5, t, 1.0, 2.0, 3.0)];
        let csv = events_to_csv(&raw).unwrap();
        assert_eq!(csv.lines().nth(1).unwrap(), "a,p,1.5,1970-01-01 00:00:00.000,1.0,2.0,3.0,,,,,");
        let back = read_events(csv.as_bytes()).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn daily_layout() {
        let daily = vec![DailyCount {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            quake_count: 3,
        }];
        let mut buf = Vec::new();
        write_daily(&daily, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "date,quake_count\n2024-01-01,3\n");
    }
}
