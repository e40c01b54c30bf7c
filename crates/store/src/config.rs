use crate::types::SortOrder;
use std::time::Duration;

pub const STORE_URL_ENV: &str = "DIRECTORY_STORE_URL";
pub const STORE_KEY_ENV: &str = "DIRECTORY_STORE_KEY";
const LEGACY_URL_ENV: &str = "SUPABASE_URL";
const LEGACY_KEY_ENV: &str = "SUPABASE_ANON_KEY";

pub const DEFAULT_TABLE: &str = "aziende";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the hosted database.
///
/// Only constructed when both the endpoint and the key are present; a
/// missing half means degraded mode, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub api_key: String,
    pub table: String,
    pub order: SortOrder,
    pub timeout: Duration,
}

impl StoreConfig {
    /// Build from explicit values; `None` when either is blank
    #[must_use]
    pub fn new(url: Option<&str>, api_key: Option<&str>) -> Option<Self> {
        let url = non_blank(url)?;
        let api_key = non_blank(api_key)?;
        Some(Self {
            url: url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            table: DEFAULT_TABLE.to_string(),
            order: SortOrder::default(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Read `DIRECTORY_STORE_URL` / `DIRECTORY_STORE_KEY`, falling back to the legacy names
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let (url, key) = Self::env_credentials();
        let config = Self::new(url.as_deref(), key.as_deref());
        if config.is_none() {
            log::info!(
                "{STORE_URL_ENV}/{STORE_KEY_ENV} not set; serving the built-in directory"
            );
        }
        config
    }

    /// The endpoint and key as found in the environment, each on its own
    #[must_use]
    pub fn env_credentials() -> (Option<String>, Option<String>) {
        (
            env_first(&[STORE_URL_ENV, LEGACY_URL_ENV]),
            env_first(&[STORE_KEY_ENV, LEGACY_KEY_ENV]),
        )
    }

    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    #[must_use]
    pub const fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn env_first(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
