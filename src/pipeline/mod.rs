//! Pipeline stages and entry points.
//!
//! - `run_pipeline`: full curation run against the mirrors
//! - `run_split`: re-shard an existing curated document
//! - `run_verify`: check the published documents

pub mod context;
pub mod dedupe;
pub mod normalize;
pub mod run;
pub mod shard;
pub mod tags;
pub mod verify;

pub use context::PipelineContext;
pub use dedupe::{DedupeOutcome, dedupe};
pub use normalize::{NormalizeOutcome, Normalizer, UNKNOWN_COUNTRY};
pub use run::{log_summary, run_pipeline, run_pipeline_with, run_split, write_snapshots};
pub use shard::{matches_region, shard};
pub use tags::{TagCategorizer, UNCATEGORIZED};
pub use verify::{DocumentCheck, DocumentStatus, VerifyReport, run_verify};
