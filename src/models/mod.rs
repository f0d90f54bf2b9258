// src/models/mod.rs

//! Domain models for the curator.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod region;
mod snapshot;
mod station;

// Re-export all public types
pub use config::{Config, FetchConfig, MirrorConfig, NormalizeConfig, OutputConfig};
pub use region::Region;
pub use snapshot::{
    CURATED_FILE, CuratedSnapshot, RegionSnapshot, RunStats, iso_timestamp,
};
pub use station::{CuratedStation, RawStation};
