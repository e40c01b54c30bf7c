//! # Directory Model
//!
//! The company record as the rest of the workspace sees it, plus the flat
//! row shape the hosted database stores.
//!
//! ## Architecture
//!
//! ```text
//! CompanyRow (nome, settore, prodotti[], ...)
//!     │
//!     ├──> Company::from(row)          null arrays → []
//!     │                               null scalars → ""
//!     │
//! Company (name, sector, products, contact { .. })
//!     │
//!     ├──> CompanyRow::from(&company)     full row, keeps id/created_at
//!     └──> NewCompanyRow::from(&company)  insert payload, no id/created_at
//! ```
//!
//! The closed enumerations ([`Sector`], [`CompanySize`], [`CompanyType`]) are
//! what the submission form offers. Reads never validate against them: a
//! row with an unknown sector label passes through untouched.

mod company;
mod error;
mod options;
mod row;

pub use company::{Company, Contact, SHORT_DESCRIPTION_MAX_CHARS};
pub use error::{ModelError, Result};
pub use options::{CompanySize, CompanyType, Sector};
pub use row::{CompanyRow, NewCompanyRow};
