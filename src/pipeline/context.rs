// src/pipeline/context.rs

//! State threaded through the stages of one run.

use chrono::Utc;

use crate::models::{RawStation, RunStats};

/// Everything a run accumulates before deduplication.
///
/// Owned by the run and passed `&mut` from stage to stage.
#[derive(Debug, Default)]
pub struct PipelineContext {
    /// Mirrors that passed the probe (or the fallback)
    pub mirrors: Vec<String>,
    /// Records from offset pagination, in mirror order
    pub primary: Vec<RawStation>,
    /// Records from the alternate-sort queries
    pub supplemental: Vec<RawStation>,
    pub stats: RunStats,
}

impl PipelineContext {
    pub fn new() -> Self {
        Self {
            stats: RunStats {
                started_at: Some(Utc::now()),
                ..RunStats::default()
            },
            ..Self::default()
        }
    }

    /// Raw records gathered so far, both batches.
    pub fn raw_count(&self) -> usize {
        self.primary.len() + self.supplemental.len()
    }

    /// Take both batches out, leaving the context empty.
    pub fn take_batches(&mut self) -> (Vec<RawStation>, Vec<RawStation>) {
        (
            std::mem::take(&mut self.primary),
            std::mem::take(&mut self.supplemental),
        )
    }
}
