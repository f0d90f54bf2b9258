//! Tag categorization.
//!
//! Free-text tags such as `"Top 40,hits,FM,Pop Music"` are mapped onto a
//! small set of canonical labels (`"pop"`). Unknown tokens survive when they
//! look like real words. Every canonical label maps to itself, so running the
//! categorizer over its own output changes nothing.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Label emitted when no token survives.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Canonical label followed by the tokens that map to it.
const CATEGORIES: &[(&str, &[&str])] = &[
    // Genres
    (
        "pop",
        &[
            "pop music", "top 40", "top40", "hits", "charts", "dance pop", "k-pop", "kpop",
            "j-pop", "jpop", "c-pop", "mandopop", "cantopop", "europop",
        ],
    ),
    (
        "rock",
        &[
            "classic rock", "alternative", "alternative rock", "indie", "indie rock", "hard rock",
            "punk", "grunge", "rock n roll", "rock'n'roll", "soft rock", "progressive rock",
        ],
    ),
    ("metal", &["heavy metal", "death metal", "black metal", "metalcore"]),
    ("jazz", &["smooth jazz", "swing", "bebop", "big band", "jazz fusion"]),
    (
        "classical",
        &["classic", "orchestral", "opera", "baroque", "symphony", "chamber music", "klassik"],
    ),
    (
        "electronic",
        &[
            "electronica", "edm", "dance", "house", "deep house", "techno", "trance",
            "drum and bass", "dnb", "dubstep", "electro", "synthwave",
        ],
    ),
    ("hiphop", &["hip hop", "hip-hop", "rap", "trap"]),
    ("rnb", &["r&b", "r'n'b", "rhythm and blues", "soul", "funk", "motown"]),
    ("country", &["bluegrass", "americana", "country music"]),
    ("blues", &["delta blues", "blues rock"]),
    ("reggae", &["ska", "dub", "dancehall", "roots reggae"]),
    (
        "latin",
        &[
            "salsa", "bachata", "reggaeton", "cumbia", "merengue", "tango", "latino",
            "musica latina", "bossa nova", "samba",
        ],
    ),
    ("folk", &["traditional", "acoustic", "folklore", "singer-songwriter"]),
    ("oldies", &["60s", "70s", "80s", "90s", "retro", "golden oldies", "classic hits"]),
    ("ambient", &["chillout", "chill", "lounge", "relax", "relaxing", "easy listening", "downtempo"]),
    ("world", &["world music", "ethnic", "african", "celtic"]),
    // Station types
    ("public", &["public radio", "npr", "public service", "state radio"]),
    (
        "community",
        &["community radio", "college radio", "university", "student", "campus radio"],
    ),
    // Content categories
    (
        "news",
        &[
            "news radio", "noticias", "nachrichten", "actualites", "information", "info",
            "current affairs",
        ],
    ),
    ("talk", &["talk radio", "speech", "podcast", "discussion", "spoken word", "interviews"]),
    ("sports", &["sport", "football", "soccer", "baseball", "cricket"]),
    (
        "religious",
        &[
            "christian", "gospel", "catholic", "islamic", "quran", "worship", "church",
            "religion", "christian music", "praise",
        ],
    ),
    ("kids", &["children", "kinder", "family"]),
    ("culture", &["arts", "education", "educational", "cultural", "literature"]),
    ("comedy", &["humor", "humour", "stand-up"]),
];

/// Tokens that carry no information about a station.
const STOPWORDS: &[&str] = &[
    "the", "and", "radio", "station", "stations", "fm", "am", "online", "live", "music",
    "web", "webradio", "internet", "stream", "streaming", "hd", "24/7", "various", "mix",
    "und", "der", "die", "das", "les", "del", "los", "las",
];

/// Lowercase token → canonical label, built once.
static SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    for (label, synonyms) in CATEGORIES {
        table.insert(*label, *label);
        for synonym in *synonyms {
            table.insert(*synonym, *label);
        }
    }
    table
});

/// Look up the canonical label for a lowercase token.
pub fn canonical_label(token: &str) -> Option<&'static str> {
    SYNONYMS.get(token).copied()
}

/// Maps a comma-separated tag string onto at most `max_labels` labels.
#[derive(Debug, Clone, Copy)]
pub struct TagCategorizer {
    max_labels: usize,
    max_length: usize,
}

impl TagCategorizer {
    pub fn new(max_labels: usize, max_length: usize) -> Self {
        Self {
            max_labels: max_labels.max(1),
            max_length,
        }
    }

    /// Categorize `raw` into a comma-joined label string.
    ///
    /// Table labels rank ahead of passthrough tokens; within each group the
    /// first-seen order is kept. Labels that would push the result past
    /// `max_length` characters are left out.
    pub fn categorize(&self, raw: &str) -> String {
        let mut categories: Vec<&str> = Vec::new();
        let mut passthrough: Vec<String> = Vec::new();

        for token in raw.split(',') {
            let token = token.trim().to_lowercase();
            if token.is_empty() {
                continue;
            }
            match canonical_label(&token) {
                Some(label) => {
                    if !categories.contains(&label) {
                        categories.push(label);
                    }
                }
                None => {
                    if keep_unknown(&token) && !passthrough.contains(&token) {
                        passthrough.push(token);
                    }
                }
            }
        }

        let mut selected: Vec<&str> = Vec::with_capacity(self.max_labels);
        let mut length = 0;
        for label in categories
            .iter()
            .copied()
            .chain(passthrough.iter().map(String::as_str))
        {
            if selected.len() == self.max_labels {
                break;
            }
            let separator = usize::from(!selected.is_empty());
            let added = separator + label.chars().count();
            if length + added > self.max_length {
                continue;
            }
            length += added;
            selected.push(label);
        }

        if selected.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            selected.join(",")
        }
    }
}

/// Unknown tokens need more than two characters, no digits and must not be
/// a stopword. Digit-bearing synonyms ("80s", "top 40") are matched by the
/// table before this check.
fn keep_unknown(token: &str) -> bool {
    token.chars().count() > 2
        && !token.chars().any(|c| c.is_ascii_digit())
        && !STOPWORDS.contains(&token)
}
