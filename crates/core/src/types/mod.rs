//! Core types for Tiffin.
//!
//! This module provides type-safe wrappers for the stored records.

pub mod collection;
pub mod customer;
pub mod email;
pub mod id;

pub use collection::{Collection, UnknownCollection};
pub use customer::{Customer, NewCustomer};
pub use email::{Email, EmailError};
pub use id::RecordId;
