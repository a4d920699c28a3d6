//! Nexus client - application shell for the web front end.
//!
//! Everything the UI needs that is not rendering:
//!
//! - [`api::ApiClient`] - typed access to the HTTP API
//! - [`session::SessionManager`] - the persisted Anonymous/Authenticated
//!   state machine
//! - [`routing`] - pure view routing with role redirects
//! - [`views`] - catalog filtering, search, and image fallbacks
//!
//! Session persistence is injected through [`storage::StoragePort`], so the
//! same state machine runs against a file in the app and against memory in
//! tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod routing;
pub mod session;
pub mod storage;
pub mod views;

pub use api::{ApiClient, ClientError};
pub use routing::{View, resolve, route_for};
pub use session::{SessionError, SessionManager, SessionState};
pub use storage::{FileStorage, MemoryStorage, StorageError, StoragePort};
