//! quake-insight entrypoint: refresh the feed (cached per window), filter,
//! enrich, export. Runs a single cycle or re-runs on an interval until Ctrl+C.

use quake_insight::{
    config::{ExportConfig, QuakeConfig},
    enrich::EnrichmentPipeline,
    export,
    feed::{FeedCache, FeedSource, FileFeedSource, HttpFeedSource},
    filter::FilterRanges,
    logging::{RunReport, StructuredLogger},
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::info;

fn run_one_cycle(
    cycle: u64,
    cache: &mut FeedCache,
    source: &dyn FeedSource,
    filter: &FilterRanges,
    pipeline: &EnrichmentPipeline,
    export_cfg: &ExportConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let snapshot = cache.get_or_refresh(source)?;
    let fetched = snapshot.len();
    let working = filter.apply(snapshot);
    info!(fetched, selected = working.len(), "working set selected");

    let output = pipeline.run(working);

    let csv_path = export_cfg.csv_path.as_deref();
    if let Some(path) = csv_path {
        export::export_events(path, &output.events)?;
    }
    if let Some(path) = export_cfg.daily_csv_path.as_deref() {
        export::export_daily(path, &output.daily)?;
    }

    let path_str = csv_path.map(|p| p.to_string_lossy().into_owned());
    let mut report = RunReport::new(cycle, fetched, &output);
    report.export_path = path_str.as_deref();
    StructuredLogger::emit_json(&report, &mut std::io::stdout());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("QUAKE_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = QuakeConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    let source: Box<dyn FeedSource> = match &config.feed.source_path {
        Some(path) => {
            info!(path = %path.display(), "quake-insight starting (file feed)");
            Box::new(FileFeedSource::new(path.clone()))
        }
        None => {
            let http = HttpFeedSource::new(&config.feed)?;
            info!(url = %http.url(), "quake-insight starting (http feed)");
            Box::new(http)
        }
    };

    let mut cache = FeedCache::new(Duration::from_secs(config.feed.cache_ttl_secs));
    let filter = FilterRanges::from(&config.filter);
    let pipeline = EnrichmentPipeline::new(&config.cluster, &config.anomaly);

    let interval_secs = config.feed.refresh_interval_secs;
    if interval_secs > 0 {
        info!(interval_secs, ttl_secs = cache.ttl().as_secs(), "refresh loop (Ctrl+C to stop)");
        static STOP: AtomicBool = AtomicBool::new(false);
        let _ = ctrlc::set_handler(|| {
            STOP.store(true, Ordering::Relaxed);
        });
        let mut cycle: u64 = 0;
        while !STOP.load(Ordering::Relaxed) {
            cycle += 1;
            if let Err(e) = run_one_cycle(
                cycle,
                &mut cache,
                source.as_ref(),
                &filter,
                &pipeline,
                &config.export,
            ) {
                tracing::warn!(cycle, error = %e, "cycle failed");
            }
            for _ in 0..interval_secs {
                if STOP.load(Ordering::Relaxed) {
                    break;
                }
                std::thread::sleep(Duration::from_secs(1));
            }
        }
        info!("quake-insight stopping");
    } else {
        run_one_cycle(1, &mut cache, source.as_ref(), &filter, &pipeline, &config.export)?;
        info!("quake-insight cycle complete");
    }

    Ok(())
}
