//! Authentication route handlers.
//!
//! Registration and login both answer with the signed-in identity plus a
//! session token; the client sends the token back as a bearer header.

use axum::{Json, extract::State, http::StatusCode};
use nexus_core::{AuthSession, Role};
use serde::Deserialize;

use crate::{
    error::Result, middleware::OptionalBearer, services::auth::AuthService, state::AppState,
};

// =============================================================================
// Request Types
// =============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Create an account and sign it in.
///
/// # Errors
///
/// Returns 400 if the username is empty or already registered.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthSession>> {
    let session = AuthService::new(state.pool())
        .register(&body.username, &body.password, body.role)
        .await?;

    tracing::info!(
        user_id = %session.identity.id,
        username = %session.identity.username,
        role = %session.identity.role,
        "User registered"
    );

    Ok(Json(session))
}

/// Sign in with username and password.
///
/// # Errors
///
/// Returns 401 for an unknown username or a wrong password; the response
/// does not distinguish the two.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthSession>> {
    let session = AuthService::new(state.pool())
        .login(&body.username, &body.password)
        .await?;

    tracing::info!(user_id = %session.identity.id, "User logged in");

    Ok(Json(session))
}

/// Revoke the current session.
///
/// Lenient: a missing, malformed, or already-revoked token still gets 204 so
/// the client can always clear its local state.
///
/// # Errors
///
/// Returns 500 if the session store fails.
pub async fn logout(
    State(state): State<AppState>,
    OptionalBearer(token): OptionalBearer,
) -> Result<StatusCode> {
    if let Some(token) = token {
        AuthService::new(state.pool()).logout(&token).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}
