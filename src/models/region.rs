// src/models/region.rs

//! Geographic buckets used for the per-region snapshot documents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A region bucket with a fixed list of recognized country names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Asia,
    Europe,
    Americas,
    Africa,
    Oceania,
}

impl Region {
    /// All regions, in document order.
    pub const ALL: [Region; 5] = [
        Region::Asia,
        Region::Europe,
        Region::Americas,
        Region::Africa,
        Region::Oceania,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Asia => "asia",
            Region::Europe => "europe",
            Region::Americas => "americas",
            Region::Africa => "africa",
            Region::Oceania => "oceania",
        }
    }

    /// Country names matched against a station's `country` field.
    pub fn countries(&self) -> &'static [&'static str] {
        match self {
            Region::Asia => &[
                "China",
                "Japan",
                "South Korea",
                "India",
                "Indonesia",
                "Thailand",
                "Vietnam",
                "Malaysia",
                "Philippines",
                "Singapore",
                "Taiwan",
                "Hong Kong",
                "Macao",
                "Bangladesh",
                "Pakistan",
                "Sri Lanka",
            ],
            Region::Europe => &[
                "United Kingdom",
                "Germany",
                "France",
                "Italy",
                "Spain",
                "Netherlands",
                "Sweden",
                "Norway",
                "Finland",
                "Denmark",
                "Switzerland",
                "Austria",
                "Belgium",
                "Ireland",
                "Portugal",
                "Poland",
                "Russia",
                "Ukraine",
            ],
            Region::Americas => &[
                "United States",
                "Canada",
                "Mexico",
                "Brazil",
                "Argentina",
                "Chile",
                "Colombia",
                "Peru",
                "Venezuela",
                "Cuba",
                "Ecuador",
                "Dominican",
            ],
            Region::Africa => &[
                "South Africa",
                "Egypt",
                "Nigeria",
                "Kenya",
                "Morocco",
                "Ethiopia",
                "Ghana",
                "Tanzania",
                "Algeria",
                "Uganda",
                "Sudan",
            ],
            Region::Oceania => &[
                "Australia",
                "New Zealand",
                "Fiji",
                "Papua New Guinea",
                "New Caledonia",
            ],
        }
    }

    /// File name of this region's snapshot document.
    pub fn file_name(&self) -> String {
        format!("{}-stations.json", self.as_str())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
