// src/pipeline/run.rs

//! End-to-end curation run.
//!
//! Probe → paginate → supplement → dedupe → normalize → write curated → shard.
//! Network failures never abort a run; an empty run still writes every
//! document with zero stations.

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{CURATED_FILE, Config, CuratedSnapshot, RegionSnapshot, RunStats};
use crate::pipeline::{Normalizer, PipelineContext, dedupe, shard};
use crate::services::{EndpointProber, PaginatedFetcher, StationApi, SupplementalQueryFetcher};
use crate::storage::SnapshotStorage;

/// Run the full pipeline with a client built from `config`.
pub async fn run_pipeline(config: &Config, storage: &dyn SnapshotStorage) -> Result<RunStats> {
    let api = StationApi::new(&config.fetch)?;
    run_pipeline_with(config, &api, storage).await
}

/// Run the full pipeline with an existing [`StationApi`].
pub async fn run_pipeline_with(
    config: &Config,
    api: &StationApi,
    storage: &dyn SnapshotStorage,
) -> Result<RunStats> {
    let mut ctx = PipelineContext::new();

    log::info!("[1/5] Probing {} mirrors", config.mirrors.endpoints.len());
    EndpointProber::new(api, config.fetch.probe_timeout())
        .select_mirrors(&config.mirrors, &mut ctx)
        .await;

    log::info!("[2/5] Paging through {} mirror(s)", ctx.mirrors.len());
    PaginatedFetcher::new(api, &config.fetch)
        .fetch_all(&mut ctx)
        .await;

    let supplemental = SupplementalQueryFetcher::new(api, &config.fetch);
    if supplemental.is_needed(&ctx) {
        let mirror = config
            .mirrors
            .supplemental
            .clone()
            .or_else(|| ctx.mirrors.first().cloned())
            .unwrap_or_else(|| config.mirrors.fallback.clone());
        log::info!("[3/5] Primary batch below coverage target, supplementing");
        supplemental.fetch(&mirror, &mut ctx).await;
    } else {
        log::info!("[3/5] Primary batch meets coverage target, no supplemental queries");
    }

    log::info!("[4/5] Deduplicating {} raw records", ctx.raw_count());
    let (primary, extra) = ctx.take_batches();
    let merged = dedupe(primary, extra);
    ctx.stats.missing_identifier = merged.missing_identifier;
    ctx.stats.duplicates = merged.duplicates;

    let normalized = Normalizer::new(&config.normalize).normalize(merged.stations);
    ctx.stats.invalid_records = normalized.invalid;
    ctx.stats.liveness_filtered = normalized.liveness_filtered;
    ctx.stats.curated = normalized.stations.len();

    if normalized.stations.is_empty() {
        log::warn!("No valid stations collected, writing empty documents");
    }

    log::info!("[5/5] Writing snapshots to {}", storage.location());
    let curated = CuratedSnapshot::new(normalized.stations, &config.output.source, Utc::now());
    let regions = write_snapshots(storage, &curated).await?;
    for region in &regions {
        ctx.stats
            .region_counts
            .insert(region.region.to_string(), region.total_stations);
    }

    ctx.stats.finished_at = Some(Utc::now());
    log_summary("Curation run", &ctx.stats);
    Ok(ctx.stats)
}

/// Write the curated document, then every region document derived from it.
pub async fn write_snapshots(
    storage: &dyn SnapshotStorage,
    curated: &CuratedSnapshot,
) -> Result<Vec<RegionSnapshot>> {
    storage.write_curated(curated).await?;

    let regions = shard(&curated.stations, &curated.last_updated);
    for region in &regions {
        storage.write_region(region).await?;
    }
    Ok(regions)
}

/// Re-shard an existing curated document without touching the network.
///
/// The region documents reuse the curated document's `lastUpdated`.
pub async fn run_split(storage: &dyn SnapshotStorage) -> Result<Vec<RegionSnapshot>> {
    let curated = storage.read_curated().await?.ok_or_else(|| {
        AppError::storage(format!(
            "{} not found in {}",
            CURATED_FILE,
            storage.location()
        ))
    })?;

    log::info!(
        "Splitting {} curated stations from {}",
        curated.total_stations,
        curated.last_updated
    );

    let regions = shard(&curated.stations, &curated.last_updated);
    for region in &regions {
        storage.write_region(region).await?;
    }
    Ok(regions)
}

/// Log a titled list of key/value pairs.
pub fn log_summary(title: &str, stats: &RunStats) {
    log::info!("[SUMMARY] {}", title);
    for (key, value) in stats.summary_items() {
        log::info!("    {}: {}", key, value);
    }
    if let (Some(start), Some(end)) = (stats.started_at, stats.finished_at) {
        log::info!("    Elapsed: {}s", (end - start).num_seconds());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CuratedStation, Region};
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    fn station(id: &str, country: &str, votes: i64) -> CuratedStation {
        CuratedStation {
            stationuuid: id.to_string(),
            name: format!("Station {id}"),
            country: country.to_string(),
            countrycode: String::new(),
            url_resolved: format!("https://{id}.example"),
            tags: "jazz".to_string(),
            language: "english".to_string(),
            votes,
            geo_lat: None,
            geo_long: None,
            lastchecktime: None,
            clickcount: Some(0),
            bitrate: None,
            codec: None,
        }
    }

    #[tokio::test]
    async fn test_write_snapshots_writes_six_documents() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let curated = CuratedSnapshot::new(
            vec![station("1", "Japan", 10), station("2", "Kenya", 5)],
            "Radio Browser API",
            Utc::now(),
        );

        let regions = write_snapshots(&storage, &curated).await.unwrap();

        assert_eq!(regions.len(), 5);
        assert!(tmp.path().join(CURATED_FILE).exists());
        for region in Region::ALL {
            let loaded = storage.read_region(region).await.unwrap().unwrap();
            assert_eq!(loaded.last_updated, curated.last_updated);
        }
        let africa = storage.read_region(Region::Africa).await.unwrap().unwrap();
        assert_eq!(africa.total_stations, 1);
        assert_eq!(africa.stations[0].stationuuid, "2");
    }

    #[tokio::test]
    async fn test_split_reuses_curated_timestamp() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let mut curated = CuratedSnapshot::new(
            vec![station("1", "Brazil", 3)],
            "Radio Browser API",
            Utc::now(),
        );
        curated.last_updated = "2025-06-01T12:00:00.000Z".to_string();
        storage.write_curated(&curated).await.unwrap();

        let regions = run_split(&storage).await.unwrap();

        let americas = regions
            .iter()
            .find(|r| r.region == Region::Americas)
            .unwrap();
        assert_eq!(americas.total_stations, 1);
        let loaded = storage.read_region(Region::Americas).await.unwrap().unwrap();
        assert_eq!(loaded.last_updated, "2025-06-01T12:00:00.000Z");
    }

    #[tokio::test]
    async fn test_split_without_curated_fails() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        assert!(matches!(
            run_split(&storage).await,
            Err(AppError::Storage(_))
        ));
    }
}
