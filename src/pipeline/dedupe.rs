// src/pipeline/dedupe.rs

//! Merge raw batches into one record per station identifier.

use std::collections::HashSet;

use crate::models::RawStation;

/// Deduplicated records plus what was dropped on the way.
#[derive(Debug, Default)]
pub struct DedupeOutcome {
    pub stations: Vec<RawStation>,
    /// Records without a usable identifier
    pub missing_identifier: usize,
    /// Later occurrences of an identifier already seen
    pub duplicates: usize,
}

/// Merge `primary` then `supplemental`, first occurrence wins.
pub fn dedupe(primary: Vec<RawStation>, supplemental: Vec<RawStation>) -> DedupeOutcome {
    let mut seen: HashSet<String> = HashSet::with_capacity(primary.len());
    let mut outcome = DedupeOutcome {
        stations: Vec::with_capacity(primary.len()),
        ..DedupeOutcome::default()
    };

    for station in primary.into_iter().chain(supplemental) {
        let Some(id) = station.identifier() else {
            outcome.missing_identifier += 1;
            continue;
        };
        if seen.insert(id.to_string()) {
            outcome.stations.push(station);
        } else {
            outcome.duplicates += 1;
        }
    }

    outcome
}
