use crate::error::Result;
use crate::types::SortOrder;
use async_trait::async_trait;
use directory_model::{CompanyRow, NewCompanyRow};

/// The external store boundary: list every row, insert one.
#[async_trait]
pub trait CompanySource: Send + Sync {
    async fn select(&self, order: SortOrder) -> Result<Vec<CompanyRow>>;

    async fn insert(&self, row: NewCompanyRow) -> Result<()>;

    /// Short label for logs
    fn describe(&self) -> String;
}
