//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid username (empty).
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] nexus_core::UsernameError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username already exists.
    #[error("username already exists")]
    UsernameTaken,

    /// Bearer token unknown, expired, or revoked.
    #[error("invalid session")]
    InvalidSession,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
