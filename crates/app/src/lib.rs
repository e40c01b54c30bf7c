//! # Directory App
//!
//! Everything a user does with the directory, without any rendering:
//! which view is showing, what the listing filter holds, and the company
//! being entered.
//!
//! ```text
//! Session
//!   ├─ ViewRouter      home ⇄ listing ⇄ profile ⇄ add-company
//!   ├─ CompanyFilter   query · location · sector
//!   ├─ SubmissionForm  raw fields → Company
//!   └─ DirectoryStore  shared list, loads and creates
//! ```
//!
//! Network work is split in two halves: `begin_*` hands out an owned unit
//! that can be awaited anywhere, `finish_*` applies its result only if it
//! is still current.

mod error;
mod form;
mod router;
mod session;

pub use error::{AppError, FormError, Result, RouteError};
pub use form::{
    generate_id, parse_list, FormField, SubmissionForm, DEFAULT_COVER, LOGO_PLACEHOLDER_BASE,
};
pub use router::{ListingSeed, Navigation, Transition, View, ViewKind, ViewRouter};
pub use session::{
    CreateResult, LoadedSnapshot, PendingCreate, PendingLoad, Screen, Session, SubmitOutcome,
    FEATURED_COUNT, SAVE_ERROR_MESSAGE,
};
