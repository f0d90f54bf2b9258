// src/services/paginated.rs

//! Offset pagination across the usable mirrors.
//!
//! Requests are issued one at a time. Each page gets a bounded number of
//! attempts; a page that never succeeds is skipped. Pagination of a mirror
//! ends after a run of empty pages, and the whole fetch ends once the
//! aggregate target is reached.

use crate::error::Result;
use crate::models::FetchConfig;
use crate::pipeline::PipelineContext;
use crate::services::StationApi;
use crate::utils::pause;
use crate::utils::retry::{RetryPolicy, retry};
use crate::utils::url::{StationQuery, mirror_host};

/// How a mirror's pagination ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// Count discovery failed; nothing was paged
    Skipped,
    /// Every planned page was attempted
    Completed { pages: u64 },
    /// Stopped early after consecutive empty pages
    EmptyRun { pages: u64 },
    /// Aggregate target reached; no further mirrors are fetched
    TargetReached,
}

/// Primary fetch stage.
pub struct PaginatedFetcher<'a> {
    api: &'a StationApi,
    config: &'a FetchConfig,
    policy: RetryPolicy,
}

impl<'a> PaginatedFetcher<'a> {
    pub fn new(api: &'a StationApi, config: &'a FetchConfig) -> Self {
        Self {
            api,
            config,
            policy: RetryPolicy::from_config(config),
        }
    }

    /// Page through every usable mirror in `ctx.mirrors`.
    pub async fn fetch_all(&self, ctx: &mut PipelineContext) -> Vec<MirrorOutcome> {
        let mirrors = ctx.mirrors.clone();
        let mut outcomes = Vec::with_capacity(mirrors.len());

        for mirror in &mirrors {
            if self.target_reached(ctx) {
                log::info!(
                    "Aggregate target of {} records reached, skipping remaining mirrors",
                    self.config.aggregate_target
                );
                break;
            }

            let before = ctx.primary.len();
            let outcome = self.fetch_mirror(mirror, ctx).await;
            log::info!(
                "Mirror {}: {:?}, {} new records ({} total)",
                mirror_host(mirror),
                outcome,
                ctx.primary.len() - before,
                ctx.primary.len()
            );

            outcomes.push(outcome);
            if outcome == MirrorOutcome::TargetReached {
                break;
            }
        }

        ctx.stats.primary_records = ctx.primary.len();
        outcomes
    }

    /// Page through one mirror, appending to `ctx.primary`.
    pub async fn fetch_mirror(&self, mirror: &str, ctx: &mut PipelineContext) -> MirrorOutcome {
        let host = mirror_host(mirror);
        let total = match self.discover_count(mirror).await {
            Ok(total) => total,
            Err(e) => {
                log::warn!("Skipping mirror {}: count discovery failed: {}", host, e);
                ctx.stats.mirrors_skipped += 1;
                return MirrorOutcome::Skipped;
            }
        };

        pause(self.config.page_delay()).await;

        let page_size = self.config.page_size;
        let pages = total.div_ceil(page_size);
        log::info!(
            "Mirror {}: ~{} records in {} pages of {}",
            host,
            total,
            pages,
            page_size
        );

        let mut empty_run = 0;
        for page in 0..pages {
            if self.target_reached(ctx) {
                return MirrorOutcome::TargetReached;
            }

            let query = StationQuery::page(page * page_size, page_size);
            let label = format!("{} page {}/{}", host, page + 1, pages);
            let result = retry(&self.policy, &label, || self.api.fetch(mirror, &query)).await;

            match result {
                Ok(batch) => {
                    ctx.stats.pages_fetched += 1;
                    ctx.stats.malformed_records += batch.malformed;

                    if batch.is_empty() {
                        empty_run += 1;
                        log::debug!("{} was empty ({} in a row)", label, empty_run);
                        if empty_run >= self.config.max_empty_pages {
                            log::info!(
                                "{}: {} consecutive empty pages, assuming end of data",
                                host,
                                empty_run
                            );
                            return MirrorOutcome::EmptyRun { pages: page + 1 };
                        }
                    } else {
                        empty_run = 0;
                        log::debug!("{}: {} records", label, batch.stations.len());
                        ctx.primary.extend(batch.stations);
                    }

                    if page + 1 < pages {
                        pause(self.config.page_delay()).await;
                    }
                }
                Err(e) => {
                    ctx.stats.pages_failed += 1;
                    log::warn!("Skipping {}: {}", label, e);
                }
            }
        }

        if self.target_reached(ctx) {
            MirrorOutcome::TargetReached
        } else {
            MirrorOutcome::Completed { pages }
        }
    }

    /// Estimate how many records a mirror holds.
    ///
    /// Uses the count header when the mirror sends one. Otherwise one
    /// oversized sample is requested. Mirrors may cap that sample silently,
    /// so any non-empty sample is only a lower bound and the ceiling is
    /// assumed; the empty-page exit ends pagination at the real end of data.
    pub async fn discover_count(&self, mirror: &str) -> Result<u64> {
        let ceiling = self.config.count_ceiling;
        let host = mirror_host(mirror);

        let head = StationQuery::page(0, 1);
        let label = format!("{host} count header");
        let first = retry(&self.policy, &label, || self.api.fetch(mirror, &head)).await?;
        if let Some(total) = first.total_count {
            log::debug!("{}: count header reports {}", host, total);
            return Ok(total.min(ceiling));
        }

        pause(self.config.page_delay()).await;

        let sample_size = self.config.sample_size;
        let sample_query = StationQuery::page(0, sample_size);
        let label = format!("{host} count sample");
        let sample = retry(&self.policy, &label, || self.api.fetch(mirror, &sample_query)).await?;

        let received = sample.received() as u64;
        let estimate = if received == 0 { 0 } else { ceiling };
        log::debug!(
            "{}: sample of {} returned {}, estimating {}",
            host,
            sample_size,
            received,
            estimate
        );
        Ok(estimate)
    }

    fn target_reached(&self, ctx: &PipelineContext) -> bool {
        ctx.primary.len() >= self.config.aggregate_target
    }
}
