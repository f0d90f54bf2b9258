// src/services/supplemental.rs

//! Alternate-sort queries that recover records primary pagination missed.
//!
//! Mirrors under load sometimes cap or reorder offset pages. Asking one
//! mirror for large pages sorted by different fields surfaces stations that
//! fell through. Overlap is expected and left to deduplication.

use crate::models::FetchConfig;
use crate::pipeline::PipelineContext;
use crate::services::StationApi;
use crate::utils::pause;
use crate::utils::retry::{RetryPolicy, retry};
use crate::utils::url::{StationQuery, mirror_host};

/// Supplemental fetch stage.
pub struct SupplementalQueryFetcher<'a> {
    api: &'a StationApi,
    config: &'a FetchConfig,
    policy: RetryPolicy,
}

impl<'a> SupplementalQueryFetcher<'a> {
    pub fn new(api: &'a StationApi, config: &'a FetchConfig) -> Self {
        Self {
            api,
            config,
            policy: RetryPolicy::from_config(config),
        }
    }

    /// Whether the primary batch fell short of the coverage target.
    pub fn is_needed(&self, ctx: &PipelineContext) -> bool {
        ctx.primary.len() < self.config.coverage_target
    }

    /// Run every configured sort order against `mirror`.
    ///
    /// A failing query is logged and skipped; the rest still run.
    /// Returns the number of records appended to `ctx.supplemental`.
    pub async fn fetch(&self, mirror: &str, ctx: &mut PipelineContext) -> usize {
        let host = mirror_host(mirror);
        let orders = &self.config.supplemental_orders;
        let before = ctx.supplemental.len();

        log::info!(
            "Running {} supplemental queries against {} ({} primary records < {})",
            orders.len(),
            host,
            ctx.primary.len(),
            self.config.coverage_target
        );

        for (i, order) in orders.iter().enumerate() {
            if i > 0 {
                pause(self.config.page_delay()).await;
            }

            ctx.stats.supplemental_queries += 1;
            let query = StationQuery::ordered(self.config.supplemental_limit, order);
            let label = format!("{host} order={order}");

            match retry(&self.policy, &label, || self.api.fetch(mirror, &query)).await {
                Ok(batch) => {
                    ctx.stats.malformed_records += batch.malformed;
                    log::info!("{}: {} records", label, batch.stations.len());
                    ctx.supplemental.extend(batch.stations);
                }
                Err(e) => {
                    ctx.stats.supplemental_failures += 1;
                    log::warn!("Supplemental query {} failed: {}", label, e);
                }
            }
        }

        let added = ctx.supplemental.len() - before;
        ctx.stats.supplemental_records = ctx.supplemental.len();
        added
    }
}
