// src/services/prober.rs

//! Mirror reachability checks.

use std::time::Duration;

use crate::models::MirrorConfig;
use crate::pipeline::PipelineContext;
use crate::services::StationApi;
use crate::utils::url::{StationQuery, mirror_host};

/// Result of probing a single mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub mirror: String,
    pub reachable: bool,
    /// Why the mirror was rejected, if it was
    pub reason: Option<String>,
}

/// Checks which mirrors answer with well-formed station data.
pub struct EndpointProber<'a> {
    api: &'a StationApi,
    timeout: Duration,
}

impl<'a> EndpointProber<'a> {
    pub fn new(api: &'a StationApi, timeout: Duration) -> Self {
        Self { api, timeout }
    }

    /// Issue one minimal request against `mirror`.
    ///
    /// A mirror is reachable only when it returns a non-empty JSON array.
    pub async fn probe(&self, mirror: &str) -> ProbeResult {
        let query = StationQuery::page(0, 1);
        let reason = match self.api.fetch_with_timeout(mirror, &query, self.timeout).await {
            Ok(page) if !page.stations.is_empty() => None,
            Ok(_) => Some("returned no stations".to_string()),
            Err(e) => Some(e.to_string()),
        };

        ProbeResult {
            mirror: mirror.to_string(),
            reachable: reason.is_none(),
            reason,
        }
    }

    /// Probe each mirror independently, in order.
    pub async fn probe_all(&self, mirrors: &[String]) -> Vec<ProbeResult> {
        let mut results = Vec::with_capacity(mirrors.len());
        for mirror in mirrors {
            let result = self.probe(mirror).await;
            match &result.reason {
                None => log::info!("Mirror {} is reachable", mirror_host(mirror)),
                Some(reason) => log::warn!("Mirror {} unusable: {}", mirror_host(mirror), reason),
            }
            results.push(result);
        }
        results
    }

    /// Record the usable mirrors in the context.
    ///
    /// Falls back to the designated default mirror when none respond.
    pub async fn select_mirrors(&self, mirrors: &MirrorConfig, ctx: &mut PipelineContext) {
        let results = self.probe_all(&mirrors.endpoints).await;
        ctx.stats.mirrors_probed = results.len();

        let usable: Vec<String> = results
            .into_iter()
            .filter(|r| r.reachable)
            .map(|r| r.mirror)
            .collect();
        ctx.stats.mirrors_reachable = usable.len();

        if usable.is_empty() {
            log::warn!(
                "No mirror answered the probe, falling back to {}",
                mirrors.fallback
            );
            ctx.stats.used_fallback = true;
            ctx.mirrors = vec![mirrors.fallback.clone()];
        } else {
            ctx.mirrors = usable;
        }
    }
}
