//! # Directory Store
//!
//! Holds the session-wide list of companies and talks to the hosted
//! database when one is configured.
//!
//! ## Architecture
//!
//! ```text
//! DirectoryStore
//!     │
//!     ├──> Option<Arc<dyn CompanySource>>
//!     │      ├─> RestSource (PostgREST over reqwest)
//!     │      └─> None: degraded mode
//!     │
//!     ├──> load():   select → map rows → replace list
//!     │              any failure → built-in dataset
//!     │
//!     └──> create(): insert → full reload      (backed)
//!                    prepend to memory list    (degraded)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use directory_store::{DirectoryStore, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), directory_store::StoreError> {
//!     let store = DirectoryStore::from_config(StoreConfig::from_env().as_ref())?;
//!     let snapshot = store.load().await;
//!     println!("{} companies ({})", snapshot.companies.len(), snapshot.origin.as_str());
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod fallback;
mod rest;
mod source;
mod store;
mod types;

pub use config::{StoreConfig, DEFAULT_TABLE, DEFAULT_TIMEOUT, STORE_KEY_ENV, STORE_URL_ENV};
pub use error::{Result, StoreError};
pub use fallback::fallback_companies;
pub use rest::RestSource;
pub use source::CompanySource;
pub use store::DirectoryStore;
pub use types::{DataOrigin, FallbackReason, Snapshot, SortOrder};
