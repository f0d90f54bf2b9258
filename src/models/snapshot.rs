//! Snapshot documents and per-run counters.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CuratedStation, Region};

/// File name of the curated document.
pub const CURATED_FILE: &str = "curated-stations.json";

/// `curated-stations.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuratedSnapshot {
    /// ISO 8601 timestamp of the run
    pub last_updated: String,
    pub total_stations: usize,
    pub source: String,
    pub stations: Vec<CuratedStation>,
}

impl CuratedSnapshot {
    pub fn new(stations: Vec<CuratedStation>, source: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            last_updated: iso_timestamp(at),
            total_stations: stations.len(),
            source: source.into(),
            stations,
        }
    }
}

/// `{region}-stations.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSnapshot {
    pub last_updated: String,
    pub total_stations: usize,
    pub region: Region,
    pub countries: Vec<String>,
    pub stations: Vec<CuratedStation>,
}

impl RegionSnapshot {
    pub fn new(region: Region, stations: Vec<CuratedStation>, last_updated: &str) -> Self {
        Self {
            last_updated: last_updated.to_string(),
            total_stations: stations.len(),
            region,
            countries: region.countries().iter().map(|c| c.to_string()).collect(),
            stations,
        }
    }
}

/// Format a timestamp the way the documents carry it.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Counters collected over one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub mirrors_probed: usize,
    pub mirrors_reachable: usize,
    pub used_fallback: bool,
    pub mirrors_skipped: usize,
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub malformed_records: usize,
    pub primary_records: usize,
    pub supplemental_queries: usize,
    pub supplemental_failures: usize,
    pub supplemental_records: usize,
    pub missing_identifier: usize,
    pub duplicates: usize,
    pub invalid_records: usize,
    pub liveness_filtered: usize,
    pub curated: usize,
    pub region_counts: BTreeMap<String, usize>,
}

impl RunStats {
    /// Key/value pairs for the end-of-run summary.
    pub fn summary_items(&self) -> Vec<(&'static str, String)> {
        let mut items = vec![
            (
                "Mirrors reachable",
                format!("{}/{}", self.mirrors_reachable, self.mirrors_probed),
            ),
            ("Fallback mirror used", self.used_fallback.to_string()),
            ("Mirrors skipped", self.mirrors_skipped.to_string()),
            ("Pages fetched", self.pages_fetched.to_string()),
            ("Pages failed", self.pages_failed.to_string()),
            ("Malformed records", self.malformed_records.to_string()),
            ("Primary records", self.primary_records.to_string()),
            (
                "Supplemental queries failed",
                format!(
                    "{}/{}",
                    self.supplemental_failures, self.supplemental_queries
                ),
            ),
            ("Supplemental records", self.supplemental_records.to_string()),
            ("Missing identifier", self.missing_identifier.to_string()),
            ("Duplicates", self.duplicates.to_string()),
            ("Invalid records", self.invalid_records.to_string()),
            ("Liveness filtered", self.liveness_filtered.to_string()),
            ("Curated stations", self.curated.to_string()),
        ];
        for (region, count) in &self.region_counts {
            items.push(("Region", format!("{region}: {count}")));
        }
        items
    }
}
