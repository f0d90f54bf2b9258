// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

use crate::error::Result;

/// Query parameters of a `/stations` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationQuery<'a> {
    pub offset: u64,
    pub limit: u64,
    pub order: Option<&'a str>,
}

impl<'a> StationQuery<'a> {
    pub fn page(offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit,
            order: None,
        }
    }

    pub fn ordered(limit: u64, order: &'a str) -> Self {
        Self {
            offset: 0,
            limit,
            order: Some(order),
        }
    }
}

/// Build `{mirror}/stations?offset=..&limit=..&hidebroken=true[&order=..]`.
///
/// # Examples
/// ```
/// use radio_curator::utils::url::{StationQuery, stations_url};
///
/// let url = stations_url("https://de1.api.radio-browser.info/json", &StationQuery::page(0, 10))
///     .unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://de1.api.radio-browser.info/json/stations?offset=0&limit=10&hidebroken=true"
/// );
/// ```
pub fn stations_url(mirror: &str, query: &StationQuery<'_>) -> Result<Url> {
    let base = format!("{}/", mirror.trim().trim_end_matches('/'));
    let mut url = Url::parse(&base)?.join("stations")?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("offset", &query.offset.to_string());
        pairs.append_pair("limit", &query.limit.to_string());
        pairs.append_pair("hidebroken", "true");
        if let Some(order) = query.order {
            pairs.append_pair("order", order);
        }
    }
    Ok(url)
}

/// Extract the host from a mirror address for log lines.
pub fn mirror_host(mirror: &str) -> String {
    Url::parse(mirror)
        .ok()
        .and_then(|u| u.host_str().map(|s| s.to_string()))
        .unwrap_or_else(|| mirror.to_string())
}
