use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("A company with id {0} already exists")]
    DuplicateId(String),

    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Other(String),
}
