use thiserror::Error;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised when a label falls outside one of the closed option sets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Sector label not in the fixed category set
    #[error("Unknown sector: {0}")]
    UnknownSector(String),

    /// Size label not in the fixed bucket set
    #[error("Unknown company size: {0}")]
    UnknownSize(String),

    /// Type label not among the offered company types
    #[error("Unknown company type: {0}")]
    UnknownType(String),
}

impl ModelError {
    pub fn unknown_sector(label: impl Into<String>) -> Self {
        Self::UnknownSector(label.into())
    }

    pub fn unknown_size(label: impl Into<String>) -> Self {
        Self::UnknownSize(label.into())
    }

    pub fn unknown_type(label: impl Into<String>) -> Self {
        Self::UnknownType(label.into())
    }
}
