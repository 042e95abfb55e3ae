//! Tiffin Core - Shared types library.
//!
//! This crate provides the domain types used by every Tiffin component:
//! - `server` - REST backend for the menu, signups, orders and reservations
//! - `cli` - Operator tooling that works directly on the data directory
//!
//! # Architecture
//!
//! The core crate contains only types - no file access, no HTTP. Persistence
//! lives in the server's record store; this crate only describes what gets
//! stored.
//!
//! # Modules
//!
//! - [`types`] - Record identifiers, email addresses, collection names and
//!   the customer record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
