// src/services/client.rs

//! Thin client for the mirrors' `/stations` endpoint.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{FetchConfig, RawStation};
use crate::utils::http::{create_client, ensure_success, header_u64};
use crate::utils::url::{StationQuery, stations_url};

/// One decoded response from a mirror.
#[derive(Debug, Default)]
pub struct StationPage {
    pub stations: Vec<RawStation>,
    /// Array entries that were not station objects
    pub malformed: usize,
    /// Provider-supplied total, when the count header is present
    pub total_count: Option<u64>,
}

impl StationPage {
    /// Number of entries the mirror sent, usable or not.
    pub fn received(&self) -> usize {
        self.stations.len() + self.malformed
    }

    pub fn is_empty(&self) -> bool {
        self.received() == 0
    }
}

/// Station API shared by the prober and both fetchers.
#[derive(Debug, Clone)]
pub struct StationApi {
    client: Client,
    count_header: String,
}

impl StationApi {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self::with_client(create_client(config)?, config))
    }

    pub fn with_client(client: Client, config: &FetchConfig) -> Self {
        Self {
            client,
            count_header: config.count_header.clone(),
        }
    }

    /// Fetch one page of stations with the client's default timeout.
    pub async fn fetch(&self, mirror: &str, query: &StationQuery<'_>) -> Result<StationPage> {
        self.request(mirror, query, None).await
    }

    /// Fetch with an explicit per-request timeout.
    pub async fn fetch_with_timeout(
        &self,
        mirror: &str,
        query: &StationQuery<'_>,
        timeout: Duration,
    ) -> Result<StationPage> {
        self.request(mirror, query, Some(timeout)).await
    }

    async fn request(
        &self,
        mirror: &str,
        query: &StationQuery<'_>,
        timeout: Option<Duration>,
    ) -> Result<StationPage> {
        let url = stations_url(mirror, query)?;
        log::debug!("GET {}", url);

        let mut request = self.client.get(url.clone());
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = ensure_success(request.send().await?)?;
        let total_count = header_u64(&response, &self.count_header);
        let body = response.bytes().await?;
        let (stations, malformed) = parse_stations(&body, url.as_str())?;

        Ok(StationPage {
            stations,
            malformed,
            total_count,
        })
    }
}

/// Decode a JSON array of station objects.
///
/// The body must be an array; entries that are not station objects are
/// counted and dropped instead of failing the whole page.
pub fn parse_stations(body: &[u8], context: &str) -> Result<(Vec<RawStation>, usize)> {
    let value: Value = serde_json::from_slice(body)?;
    let Value::Array(entries) = value else {
        return Err(AppError::schema(context, "expected a JSON array of stations"));
    };

    let mut stations = Vec::with_capacity(entries.len());
    let mut malformed = 0;
    for entry in entries {
        match serde_json::from_value::<RawStation>(entry) {
            Ok(station) => stations.push(station),
            Err(e) => {
                malformed += 1;
                log::debug!("Dropping malformed station from {}: {}", context, e);
            }
        }
    }
    Ok((stations, malformed))
}
