//! Collection services.
//!
//! Thin domain wrappers over the [`JsonStore`](crate::store::JsonStore).
//! Services borrow the store and hold no state between requests; every
//! operation re-reads its collection.
//!
//! # Services
//!
//! - `menu` - Read the menu, replace it wholesale behind the admin password
//! - `customers` - Signup with unique emails, list customers
//! - `submissions` - Append orders and reservations with generated id/date

pub mod customers;
pub mod menu;
pub mod submissions;

pub use customers::CustomerService;
pub use menu::MenuService;
pub use submissions::SubmissionService;

use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;
use tiffin_core::EmailError;

use crate::store::StoreError;

/// Errors returned by collection services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Loading or saving the collection failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Signup email is already present in the customer collection.
    #[error("email already registered")]
    DuplicateEmail,

    /// Signup email is not a usable address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Supplied admin password does not match.
    #[error("unauthorized")]
    Unauthorized,

    /// Menu replacement was not a JSON array.
    #[error("menu must be an array")]
    InvalidMenu,

    /// A new record could not be converted to JSON.
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Current time at the millisecond precision stored in records.
pub(crate) fn timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
