// src/pipeline/shard.rs

//! Regional subsets of the curated list.

use crate::models::{CuratedStation, Region, RegionSnapshot};
use crate::pipeline::normalize::UNKNOWN_COUNTRY;

/// Whether `country` belongs to `region`.
///
/// Case-insensitive substring containment in either direction against any
/// listed name, so "Dominican Republic" matches "Dominican" and "Korea"
/// matches "South Korea". Blank and unknown countries never match.
pub fn matches_region(country: &str, region: Region) -> bool {
    let country = country.trim();
    if country.is_empty() || country.eq_ignore_ascii_case(UNKNOWN_COUNTRY) {
        return false;
    }
    let country = country.to_lowercase();
    region.countries().iter().any(|listed| {
        let listed = listed.to_lowercase();
        country.contains(&listed) || listed.contains(&country)
    })
}

/// Build one document per region, in `Region::ALL` order.
///
/// A station may land in more than one region. Relative order from the
/// curated list is kept.
pub fn shard(stations: &[CuratedStation], last_updated: &str) -> Vec<RegionSnapshot> {
    Region::ALL
        .iter()
        .map(|&region| {
            let members: Vec<CuratedStation> = stations
                .iter()
                .filter(|s| matches_region(&s.country, region))
                .cloned()
                .collect();
            log::info!("{}: {} stations", region, members.len());
            RegionSnapshot::new(region, members, last_updated)
        })
        .collect()
}
