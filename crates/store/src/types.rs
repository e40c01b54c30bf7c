use directory_model::Company;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order requested from the external store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// `nome` ascending
    #[default]
    NameAscending,
    /// `created_at` descending
    NewestFirst,
}

impl SortOrder {
    /// PostgREST `order` query value
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::NameAscending => "nome.asc",
            Self::NewestFirst => "created_at.desc",
        }
    }

    /// Accepts "name" or "newest" (as written in config files)
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" | "name_ascending" => Some(Self::NameAscending),
            "newest" | "newest_first" | "created_at" => Some(Self::NewestFirst),
            _ => None,
        }
    }
}

/// Why the built-in dataset is being served instead of live data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    NotConfigured,
    EmptyResult,
    QueryFailed(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => f.write_str("external store not configured"),
            Self::EmptyResult => f.write_str("external store returned no rows"),
            Self::QueryFailed(err) => write!(f, "external store query failed: {err}"),
        }
    }
}

/// Where the current directory contents came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum DataOrigin {
    Live,
    Fallback { reason: FallbackReason },
}

impl DataOrigin {
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Fallback { .. } => "fallback",
        }
    }

    #[must_use]
    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Live => None,
            Self::Fallback { reason } => Some(reason),
        }
    }
}

/// Result of a load: the full list plus its provenance
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub companies: Vec<Company>,
    pub origin: DataOrigin,
}
