//! Core types for Nexus.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod identity;
pub mod price;
pub mod product;
pub mod role;
pub mod session;
pub mod username;

pub use id::*;
pub use identity::Identity;
pub use price::{Price, PriceError};
pub use product::{NewProduct, Product};
pub use role::Role;
pub use session::AuthSession;
pub use username::{Username, UsernameError};
