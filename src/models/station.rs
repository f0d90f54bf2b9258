//! Station records as received from mirrors and as persisted.

use serde::{Deserialize, Serialize};

/// A station object as returned by `GET {mirror}/stations`.
///
/// Every field is optional; mirrors disagree on which ones they fill in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStation {
    #[serde(default)]
    pub stationuuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub countrycode: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_resolved: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub votes: Option<i64>,
    #[serde(default)]
    pub clickcount: Option<i64>,
    #[serde(default)]
    pub geo_lat: Option<f64>,
    #[serde(default)]
    pub geo_long: Option<f64>,
    #[serde(default)]
    pub bitrate: Option<i64>,
    #[serde(default)]
    pub codec: Option<String>,
    #[serde(default)]
    pub lastcheckok: Option<i64>,
    #[serde(default)]
    pub lastchecktime: Option<String>,
}

impl RawStation {
    /// Identifier, if present and not blank.
    pub fn identifier(&self) -> Option<&str> {
        self.stationuuid
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Stream address, preferring the resolved URL.
    pub fn stream_url(&self) -> Option<&str> {
        non_blank(self.url_resolved.as_deref()).or_else(|| non_blank(self.url.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A validated, cleaned station in the snapshot documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedStation {
    pub stationuuid: String,
    pub name: String,
    pub country: String,
    pub countrycode: String,
    pub url_resolved: String,
    pub tags: String,
    pub language: String,
    pub votes: i64,
    pub geo_lat: Option<f64>,
    pub geo_long: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastchecktime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clickcount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
}

impl From<&CuratedStation> for RawStation {
    fn from(station: &CuratedStation) -> Self {
        Self {
            stationuuid: Some(station.stationuuid.clone()),
            name: Some(station.name.clone()),
            country: Some(station.country.clone()),
            countrycode: Some(station.countrycode.clone()),
            url: None,
            url_resolved: Some(station.url_resolved.clone()),
            tags: Some(station.tags.clone()),
            language: Some(station.language.clone()),
            votes: Some(station.votes),
            clickcount: station.clickcount,
            geo_lat: station.geo_lat,
            geo_long: station.geo_long,
            bitrate: station.bitrate,
            codec: station.codec.clone(),
            lastcheckok: None,
            lastchecktime: station.lastchecktime.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mirror_record() {
        let json = r#"{
            "changeuuid": "a",
            "stationuuid": "96202f73-0601-11e8-ae97-52543be04c81",
            "name": "BBC Radio 1",
            "url": "http://stream.live.vc.bbcmedia.co.uk/bbc_radio_one",
            "url_resolved": "http://as-hls-ww-live.akamaized.net/radio_one.m3u8",
            "tags": "bbc,pop,top 40",
            "country": "The United Kingdom Of Great Britain And Northern Ireland",
            "countrycode": "GB",
            "language": "english",
            "votes": 12345,
            "lastcheckok": 1,
            "clickcount": 321,
            "bitrate": 128,
            "codec": "AAC",
            "geo_lat": null,
            "geo_long": null
        }"#;

        let raw: RawStation = serde_json::from_str(json).unwrap();
        assert_eq!(
            raw.identifier(),
            Some("96202f73-0601-11e8-ae97-52543be04c81")
        );
        assert_eq!(
            raw.stream_url(),
            Some("http://as-hls-ww-live.akamaized.net/radio_one.m3u8")
        );
        assert_eq!(raw.votes, Some(12345));
        assert_eq!(raw.geo_lat, None);
    }

    #[test]
    fn test_blank_identifier_is_absent() {
        let raw = RawStation {
            stationuuid: Some("   ".into()),
            ..RawStation::default()
        };
        assert_eq!(raw.identifier(), None);
    }

    #[test]
    fn test_stream_url_falls_back_to_raw_url() {
        let raw = RawStation {
            url: Some(" https://x ".into()),
            url_resolved: Some("".into()),
            ..RawStation::default()
        };
        assert_eq!(raw.stream_url(), Some("https://x"));
    }

    #[test]
    fn test_optional_fields_omitted_when_absent() {
        let station = CuratedStation {
            stationuuid: "1".into(),
            name: "Jazz FM".into(),
            country: "Unknown".into(),
            countrycode: String::new(),
            url_resolved: "https://x".into(),
            tags: String::new(),
            language: String::new(),
            votes: 0,
            geo_lat: None,
            geo_long: None,
            lastchecktime: None,
            clickcount: None,
            bitrate: None,
            codec: None,
        };

        let value = serde_json::to_value(&station).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("geo_lat"));
        assert!(object["geo_lat"].is_null());
        assert!(!object.contains_key("clickcount"));
        assert!(!object.contains_key("codec"));
    }
}
