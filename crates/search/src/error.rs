use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid sector filter: {0}")]
    InvalidSector(#[from] directory_model::ModelError),
}
