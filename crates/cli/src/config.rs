use anyhow::{Context as AnyhowContext, Result};
use directory_store::{SortOrder, StoreConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "directory.toml";
pub(crate) const DEFAULT_BIND: &str = "127.0.0.1:7700";

/// `directory.toml` as written on disk
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub store: StoreSection,
    pub server: ServerSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct StoreSection {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub table: Option<String>,
    /// "name" | "newest"
    pub order: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ServerSection {
    pub bind: Option<String>,
}

/// Values given on the command line; they win over everything else
#[derive(Debug, Default, Clone)]
pub(crate) struct Overrides {
    pub store_url: Option<String>,
    pub store_key: Option<String>,
    pub offline: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    /// `None` means degraded mode
    pub store: Option<StoreConfig>,
    pub bind: String,
}

impl FileConfig {
    /// Read an explicit path, or `directory.toml` when it exists
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

impl Settings {
    pub(crate) fn resolve(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let file = FileConfig::load(config_path)?;
        let (env_url, env_key) = StoreConfig::env_credentials();
        Self::merge(file, env_url, env_key, overrides)
    }

    /// File < environment < command line
    pub(crate) fn merge(
        file: FileConfig,
        env_url: Option<String>,
        env_key: Option<String>,
        overrides: &Overrides,
    ) -> Result<Self> {
        let bind = file
            .server
            .bind
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        if overrides.offline {
            log::info!("Offline mode requested; serving the built-in directory");
            return Ok(Self { store: None, bind });
        }

        let section = file.store;
        let url = non_blank(overrides.store_url.clone())
            .or(non_blank(env_url))
            .or(non_blank(section.url));
        let key = non_blank(overrides.store_key.clone())
            .or(non_blank(env_key))
            .or(non_blank(section.api_key));

        let order = match section.order.as_deref() {
            Some(raw) => SortOrder::parse(raw).with_context(|| {
                format!("Unknown store order {raw:?} (expected \"name\" or \"newest\")")
            })?,
            None => SortOrder::default(),
        };

        let store = StoreConfig::new(url.as_deref(), key.as_deref()).map(|config| {
            let mut config = config.order(order);
            if let Some(table) = section.table {
                config = config.table(table);
            }
            if let Some(secs) = section.timeout_secs {
                config = config.timeout(Duration::from_secs(secs));
            }
            config
        });
        if store.is_none() {
            log::info!("No external store configured; serving the built-in directory");
        }

        Ok(Self { store, bind })
    }
}

// A blank value at one level must not hide a real one below it.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
