//! Tiffin server library.
//!
//! This crate provides the restaurant backend as a library, allowing it to be
//! tested and reused by the CLI.
//!
//! # Layers
//!
//! - [`store`] - JSON file record store, one document per collection
//! - [`services`] - Collection rules (unique emails, generated ids, admin password)
//! - [`export`] - CSV formatting of collections
//! - [`routes`] - Axum handlers binding services to HTTP

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod export;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
