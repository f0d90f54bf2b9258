//! Storage abstractions for snapshot documents.
//!
//! A run replaces every document wholesale:
//!
//! ```text
//! {root}/
//! ├── config.toml               # optional configuration
//! ├── curated-stations.json     # full curated list
//! ├── asia-stations.json
//! ├── europe-stations.json
//! ├── americas-stations.json
//! ├── africa-stations.json
//! └── oceania-stations.json
//! ```

pub mod local;
#[cfg(feature = "s3")]
pub mod s3;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CuratedSnapshot, Region, RegionSnapshot};

pub use local::LocalStorage;
#[cfg(feature = "s3")]
pub use s3::S3Storage;

/// Trait for snapshot storage backends.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Replace `curated-stations.json`.
    async fn write_curated(&self, snapshot: &CuratedSnapshot) -> Result<()>;

    /// Replace `{region}-stations.json`.
    async fn write_region(&self, snapshot: &RegionSnapshot) -> Result<()>;

    /// Load the curated document, `None` if it does not exist.
    async fn read_curated(&self) -> Result<Option<CuratedSnapshot>>;

    /// Load a region document, `None` if it does not exist.
    async fn read_region(&self, region: Region) -> Result<Option<RegionSnapshot>>;

    /// Human-readable root of this backend, for logs.
    fn location(&self) -> String;
}
