//! HTTP middleware and request extractors.
//!
//! The tower layers (request tracing, CORS, static assets) are assembled in
//! `lib.rs`; this module holds the extractors that route handlers name in
//! their signatures.

pub mod auth;

pub use auth::{OptionalBearer, RequireAuth};
