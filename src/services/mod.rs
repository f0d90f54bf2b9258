//! Service layer for talking to the mirrors.
//!
//! This module contains the network-facing stages:
//! - Reachability probing (`EndpointProber`)
//! - Offset pagination (`PaginatedFetcher`)
//! - Alternate-sort coverage queries (`SupplementalQueryFetcher`)

mod client;
mod paginated;
mod prober;
mod supplemental;

pub use client::{StationApi, StationPage, parse_stations};
pub use paginated::{MirrorOutcome, PaginatedFetcher};
pub use prober::{EndpointProber, ProbeResult};
pub use supplemental::SupplementalQueryFetcher;
