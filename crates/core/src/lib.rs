//! Nexus Core - Shared types library.
//!
//! This crate provides common types used across all Nexus components:
//! - `server` - JSON API over the account and product store
//! - `client` - storefront client library (session state, routing, API access)
//! - `cli` - command-line tools for schema setup and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, usernames, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
