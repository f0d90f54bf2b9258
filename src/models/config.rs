//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP, pagination and early-exit settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Known mirrors and failover targets
    #[serde(default)]
    pub mirrors: MirrorConfig,

    /// Record cleaning stages
    #[serde(default)]
    pub normalize: NormalizeConfig,

    /// Snapshot document settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.request_timeout_secs == 0 {
            return Err(AppError::validation(
                "fetch.request_timeout_secs must be > 0",
            ));
        }
        if self.fetch.probe_timeout_secs == 0 {
            return Err(AppError::validation("fetch.probe_timeout_secs must be > 0"));
        }
        if self.fetch.page_size == 0 {
            return Err(AppError::validation("fetch.page_size must be > 0"));
        }
        if self.fetch.max_attempts == 0 {
            return Err(AppError::validation("fetch.max_attempts must be > 0"));
        }
        if self.fetch.max_empty_pages == 0 {
            return Err(AppError::validation("fetch.max_empty_pages must be > 0"));
        }
        if self.fetch.sample_size < self.fetch.page_size {
            return Err(AppError::validation(
                "fetch.sample_size must be >= fetch.page_size",
            ));
        }
        if self.fetch.count_ceiling == 0 {
            return Err(AppError::validation("fetch.count_ceiling must be > 0"));
        }
        if self.mirrors.endpoints.is_empty() {
            return Err(AppError::validation("No mirrors defined"));
        }
        if self.mirrors.fallback.trim().is_empty() {
            return Err(AppError::validation("mirrors.fallback is empty"));
        }
        for mirror in self
            .mirrors
            .endpoints
            .iter()
            .chain(std::iter::once(&self.mirrors.fallback))
            .chain(self.mirrors.supplemental.iter())
        {
            url::Url::parse(mirror)
                .map_err(|e| AppError::validation(format!("Invalid mirror '{mirror}': {e}")))?;
        }
        if self.normalize.max_tags_length == 0 {
            return Err(AppError::validation(
                "normalize.max_tags_length must be > 0",
            ));
        }
        Ok(())
    }
}

/// HTTP client, pagination and early-exit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::request_timeout")]
    pub request_timeout_secs: u64,

    /// Timeout for the reachability probe
    #[serde(default = "defaults::probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Records requested per page
    #[serde(default = "defaults::page_size")]
    pub page_size: u64,

    /// Attempts per page or query before it is skipped
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: u32,

    /// Fixed backoff between attempts in milliseconds
    #[serde(default = "defaults::retry_delay")]
    pub retry_delay_ms: u64,

    /// Delay between successful requests in milliseconds
    #[serde(default = "defaults::page_delay")]
    pub page_delay_ms: u64,

    /// Consecutive empty pages that end pagination for a mirror
    #[serde(default = "defaults::max_empty_pages")]
    pub max_empty_pages: u32,

    /// Response header carrying the provider's total count
    #[serde(default = "defaults::count_header")]
    pub count_header: String,

    /// Limit of the oversized request used when no count header is sent
    #[serde(default = "defaults::sample_size")]
    pub sample_size: u64,

    /// Upper bound for any discovered or extrapolated count
    #[serde(default = "defaults::count_ceiling")]
    pub count_ceiling: u64,

    /// Stop all pagination once this many raw records are collected
    #[serde(default = "defaults::aggregate_target")]
    pub aggregate_target: usize,

    /// Below this many raw records the supplemental queries run
    #[serde(default = "defaults::coverage_target")]
    pub coverage_target: usize,

    /// Limit of each supplemental query
    #[serde(default = "defaults::supplemental_limit")]
    pub supplemental_limit: u64,

    /// Sort orders issued by the supplemental queries
    #[serde(default = "defaults::supplemental_orders")]
    pub supplemental_orders: Vec<String>,
}

impl FetchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            request_timeout_secs: defaults::request_timeout(),
            probe_timeout_secs: defaults::probe_timeout(),
            page_size: defaults::page_size(),
            max_attempts: defaults::max_attempts(),
            retry_delay_ms: defaults::retry_delay(),
            page_delay_ms: defaults::page_delay(),
            max_empty_pages: defaults::max_empty_pages(),
            count_header: defaults::count_header(),
            sample_size: defaults::sample_size(),
            count_ceiling: defaults::count_ceiling(),
            aggregate_target: defaults::aggregate_target(),
            coverage_target: defaults::coverage_target(),
            supplemental_limit: defaults::supplemental_limit(),
            supplemental_orders: defaults::supplemental_orders(),
        }
    }
}

/// Mirror endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Base addresses probed on every run, in priority order
    #[serde(default = "defaults::endpoints")]
    pub endpoints: Vec<String>,

    /// Used alone when no endpoint answers the probe
    #[serde(default = "defaults::fallback")]
    pub fallback: String,

    /// Mirror for supplemental queries (first usable mirror when unset)
    #[serde(default)]
    pub supplemental: Option<String>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            endpoints: defaults::endpoints(),
            fallback: defaults::fallback(),
            supplemental: None,
        }
    }
}

/// Normalization stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Map free-text tags onto canonical category labels
    #[serde(default = "defaults::enabled")]
    pub categorize_tags: bool,

    /// Drop records whose last liveness check failed
    #[serde(default)]
    pub require_last_check_ok: bool,

    /// Carry lastchecktime, clickcount, bitrate and codec
    #[serde(default = "defaults::enabled")]
    pub extended_fields: bool,

    /// Maximum characters kept in the tag field
    #[serde(default = "defaults::max_tags_length")]
    pub max_tags_length: usize,

    /// Maximum category labels kept per station
    #[serde(default = "defaults::max_categories")]
    pub max_categories: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            categorize_tags: true,
            require_last_check_ok: false,
            extended_fields: true,
            max_tags_length: defaults::max_tags_length(),
            max_categories: defaults::max_categories(),
        }
    }
}

/// Snapshot document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Value of the `source` field in the curated document
    #[serde(default = "defaults::source")]
    pub source: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            source: defaults::source(),
        }
    }
}

mod defaults {
    // Fetch defaults
    pub fn user_agent() -> String {
        "radio-curator/0.1 (+https://www.radio-browser.info)".into()
    }
    pub fn request_timeout() -> u64 {
        30
    }
    pub fn probe_timeout() -> u64 {
        10
    }
    pub fn page_size() -> u64 {
        1000
    }
    pub fn max_attempts() -> u32 {
        3
    }
    pub fn retry_delay() -> u64 {
        2000
    }
    pub fn page_delay() -> u64 {
        1000
    }
    pub fn max_empty_pages() -> u32 {
        3
    }
    pub fn count_header() -> String {
        "x-total-count".into()
    }
    pub fn sample_size() -> u64 {
        10_000
    }
    pub fn count_ceiling() -> u64 {
        50_000
    }
    pub fn aggregate_target() -> usize {
        28_000
    }
    pub fn coverage_target() -> usize {
        25_000
    }
    pub fn supplemental_limit() -> u64 {
        10_000
    }
    pub fn supplemental_orders() -> Vec<String> {
        [
            "votes",
            "clickcount",
            "clicktrend",
            "name",
            "country",
            "language",
            "tags",
            "bitrate",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    // Mirror defaults
    pub fn endpoints() -> Vec<String> {
        vec![
            "https://de1.api.radio-browser.info/json".into(),
            "https://at1.api.radio-browser.info/json".into(),
            "https://nl1.api.radio-browser.info/json".into(),
        ]
    }
    pub fn fallback() -> String {
        "https://de1.api.radio-browser.info/json".into()
    }

    // Normalize defaults
    pub fn enabled() -> bool {
        true
    }
    pub fn max_tags_length() -> usize {
        100
    }
    pub fn max_categories() -> usize {
        3
    }

    // Output defaults
    pub fn source() -> String {
        "Radio Browser API".into()
    }
}
