// src/pipeline/normalize.rs

//! Validation, cleaning and ranking of deduplicated records.

use crate::models::{CuratedStation, NormalizeConfig, RawStation};
use crate::pipeline::tags::TagCategorizer;
use crate::utils::truncate_chars;

/// Country used when a record carries none.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Curated stations plus filtering counters.
#[derive(Debug, Default)]
pub struct NormalizeOutcome {
    /// Valid stations, ranked by votes
    pub stations: Vec<CuratedStation>,
    /// Records without a name or stream URL
    pub invalid: usize,
    /// Records dropped by the liveness stage
    pub liveness_filtered: usize,
}

/// Turns raw records into curated stations.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizeConfig,
    categorizer: Option<TagCategorizer>,
}

impl Normalizer {
    pub fn new(config: &NormalizeConfig) -> Self {
        let categorizer = config
            .categorize_tags
            .then(|| TagCategorizer::new(config.max_categories, config.max_tags_length));
        Self {
            config: config.clone(),
            categorizer,
        }
    }

    /// Clean every record, drop the invalid ones and rank the rest.
    pub fn normalize(&self, records: Vec<RawStation>) -> NormalizeOutcome {
        let mut outcome = NormalizeOutcome {
            stations: Vec::with_capacity(records.len()),
            ..NormalizeOutcome::default()
        };

        for raw in &records {
            if self.config.require_last_check_ok && !passed_last_check(raw) {
                outcome.liveness_filtered += 1;
                continue;
            }
            match self.normalize_one(raw) {
                Some(station) => outcome.stations.push(station),
                None => outcome.invalid += 1,
            }
        }

        rank(&mut outcome.stations);
        outcome
    }

    /// Clean a single record, or `None` when it is not usable.
    ///
    /// A record needs an identifier, a non-blank name and a stream URL.
    pub fn normalize_one(&self, raw: &RawStation) -> Option<CuratedStation> {
        let stationuuid = raw.identifier()?;
        let name = raw.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return None;
        }
        let url_resolved = raw.stream_url()?;

        let country = raw
            .country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNKNOWN_COUNTRY);

        let extended = self.config.extended_fields;

        Some(CuratedStation {
            stationuuid: stationuuid.to_string(),
            name: name.to_string(),
            country: country.to_string(),
            countrycode: trimmed(raw.countrycode.as_deref()),
            url_resolved: url_resolved.to_string(),
            tags: self.clean_tags(raw.tags.as_deref().unwrap_or_default()),
            language: trimmed(raw.language.as_deref()).to_lowercase(),
            votes: raw.votes.unwrap_or(0),
            geo_lat: raw.geo_lat,
            geo_long: raw.geo_long,
            lastchecktime: raw.lastchecktime.clone().filter(|_| extended),
            clickcount: extended.then(|| raw.clickcount.unwrap_or(0)),
            bitrate: raw.bitrate.filter(|_| extended),
            codec: raw.codec.clone().filter(|_| extended),
        })
    }

    fn clean_tags(&self, tags: &str) -> String {
        let cleaned = match &self.categorizer {
            Some(categorizer) => categorizer.categorize(tags),
            None => tags.to_lowercase(),
        };
        truncate_chars(&cleaned, self.config.max_tags_length).to_string()
    }
}

/// Stable sort by votes, highest first. Ties keep their input order.
pub fn rank(stations: &mut [CuratedStation]) {
    stations.sort_by(|a, b| b.votes.cmp(&a.votes));
}

/// Records without a liveness flag are given the benefit of the doubt.
fn passed_last_check(raw: &RawStation) -> bool {
    raw.lastcheckok.is_none_or(|flag| flag == 1)
}

fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::dedupe::dedupe;

    fn plain_config() -> NormalizeConfig {
        NormalizeConfig {
            categorize_tags: false,
            ..NormalizeConfig::default()
        }
    }

    fn raw(id: &str, name: &str, url: &str, votes: i64) -> RawStation {
        RawStation {
            stationuuid: Some(id.to_string()),
            name: Some(name.to_string()),
            url: Some(url.to_string()),
            votes: Some(votes),
            ..RawStation::default()
        }
    }

    #[test]
    fn test_duplicate_keeps_primary_record() {
        let mut first = raw("1", "BBC Radio 1", "https://x", 1000);
        first.country = Some("United Kingdom".into());
        let mut second = raw("1", "dup", "https://y", 1);
        second.country = Some("UK".into());

        let merged = dedupe(vec![first, second], Vec::new());
        let outcome = Normalizer::new(&plain_config()).normalize(merged.stations);

        assert_eq!(outcome.stations.len(), 1);
        let station = &outcome.stations[0];
        assert_eq!(station.stationuuid, "1");
        assert_eq!(station.name, "BBC Radio 1");
        assert_eq!(station.votes, 1000);
        assert_eq!(station.url_resolved, "https://x");
    }

    #[test]
    fn test_blank_name_is_invalid() {
        let outcome =
            Normalizer::new(&plain_config()).normalize(vec![raw("1", "   ", "https://x", 5)]);
        assert!(outcome.stations.is_empty());
        assert_eq!(outcome.invalid, 1);
    }

    #[test]
    fn test_missing_url_is_invalid() {
        let mut record = raw("1", "Name", "", 5);
        record.url_resolved = Some("  ".into());
        let outcome = Normalizer::new(&plain_config()).normalize(vec![record]);
        assert_eq!(outcome.invalid, 1);
    }

    #[test]
    fn test_defaults_and_cleaning() {
        let mut record = raw("abc", "  Radio Paradise  ", "http://raw", 0);
        record.url_resolved = Some("https://resolved".into());
        record.language = Some("English".into());
        record.tags = Some("Eclectic,ROCK".into());
        record.votes = None;

        let station = Normalizer::new(&plain_config())
            .normalize_one(&record)
            .unwrap();

        assert_eq!(station.name, "Radio Paradise");
        assert_eq!(station.country, UNKNOWN_COUNTRY);
        assert_eq!(station.countrycode, "");
        assert_eq!(station.url_resolved, "https://resolved");
        assert_eq!(station.language, "english");
        assert_eq!(station.tags, "eclectic,rock");
        assert_eq!(station.votes, 0);
        assert_eq!(station.clickcount, Some(0));
    }

    #[test]
    fn test_tags_truncated_to_limit() {
        let mut record = raw("1", "Name", "https://x", 0);
        record.tags = Some("X".repeat(250));
        let station = Normalizer::new(&plain_config())
            .normalize_one(&record)
            .unwrap();
        assert_eq!(station.tags, "x".repeat(100));
    }

    #[test]
    fn test_categorized_tags() {
        let mut record = raw("1", "Name", "https://x", 0);
        record.tags = Some("Top 40,Hip-Hop,the,2024".into());
        let station = Normalizer::new(&NormalizeConfig::default())
            .normalize_one(&record)
            .unwrap();
        assert_eq!(station.tags, "pop,hiphop");
    }

    #[test]
    fn test_extended_fields_optional() {
        let mut record = raw("1", "Name", "https://x", 0);
        record.bitrate = Some(128);
        record.codec = Some("MP3".into());
        let config = NormalizeConfig {
            extended_fields: false,
            ..NormalizeConfig::default()
        };
        let station = Normalizer::new(&config).normalize_one(&record).unwrap();
        assert_eq!(station.bitrate, None);
        assert_eq!(station.codec, None);
        assert_eq!(station.clickcount, None);
    }

    #[test]
    fn test_sorted_by_votes_with_stable_ties() {
        let records = vec![
            raw("a", "A", "https://a", 5),
            raw("b", "B", "https://b", 10),
            raw("c", "C", "https://c", 5),
            raw("d", "D", "https://d", 10),
            raw("e", "E", "https://e", 1),
        ];
        let outcome = Normalizer::new(&plain_config()).normalize(records);
        let order: Vec<&str> = outcome
            .stations
            .iter()
            .map(|s| s.stationuuid.as_str())
            .collect();
        assert_eq!(order, vec!["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn test_liveness_stage() {
        let mut dead = raw("1", "Dead", "https://x", 0);
        dead.lastcheckok = Some(0);
        let mut alive = raw("2", "Alive", "https://y", 0);
        alive.lastcheckok = Some(1);
        let unknown = raw("3", "Unknown", "https://z", 0);

        let config = NormalizeConfig {
            require_last_check_ok: true,
            ..NormalizeConfig::default()
        };
        let outcome = Normalizer::new(&config).normalize(vec![dead.clone(), alive, unknown]);
        assert_eq!(outcome.stations.len(), 2);
        assert_eq!(outcome.liveness_filtered, 1);

        let outcome = Normalizer::new(&NormalizeConfig::default()).normalize(vec![dead]);
        assert_eq!(outcome.stations.len(), 1);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let mut record = raw("1", "  Ñandú FM ", "https://x", 42);
        record.country = Some(" Argentina ".into());
        record.countrycode = Some("AR".into());
        record.language = Some("Spanish".into());
        record.tags = Some("Cumbia,Noticias,Rock Nacional,the,1234".into());
        record.geo_lat = Some(-34.6);
        record.geo_long = Some(-58.4);
        record.bitrate = Some(64);
        record.codec = Some("AAC+".into());
        record.lastchecktime = Some("2026-10-01 12:00:00".into());

        for config in [NormalizeConfig::default(), plain_config()] {
            let normalizer = Normalizer::new(&config);
            let once = normalizer.normalize_one(&record).unwrap();
            let twice = normalizer
                .normalize_one(&RawStation::from(&once))
                .unwrap();
            assert_eq!(once, twice);
        }
    }
}
