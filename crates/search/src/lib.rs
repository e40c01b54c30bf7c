mod error;
mod filter;

pub use error::{Result, SearchError};
pub use filter::{filter_companies, CompanyFilter, SectorFilter, ALL_SECTORS};
