//! Business logic services for the server.
//!
//! # Services
//!
//! - `auth` - Registration, login, and bearer-token sessions
//! - `catalog` - Product listing and creation

pub mod auth;
pub mod catalog;

pub use auth::{AuthError, AuthService};
pub use catalog::CatalogService;
