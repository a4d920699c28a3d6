//! Authentication extractors for route handlers.
//!
//! Sessions are opaque bearer tokens minted by the auth service and carried
//! in the `Authorization` header. Every protected handler names
//! [`RequireAuth`] in its signature; there is no session cookie layer.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{IntoResponse, Response},
};
use nexus_core::Identity;

use crate::{
    error::AppError,
    services::auth::{AuthError, AuthService},
    state::AppState,
};

/// Extractor that requires a valid session token.
///
/// The token is resolved against the session store on every request, so a
/// logged-out or expired token is rejected even if the client still holds it.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(identity): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
pub struct RequireAuth(pub Identity);

/// Error returned when a protected handler cannot establish a session.
#[derive(Debug)]
pub enum AuthRejection {
    /// No usable `Authorization: Bearer <token>` header on the request.
    MissingToken,
    /// The token did not resolve to a live session, or the lookup failed.
    Auth(AuthError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        // A missing header and an unknown token produce the same response.
        match self {
            Self::MissingToken => AppError::from(AuthError::InvalidSession).into_response(),
            Self::Auth(err) => AppError::from(err).into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthRejection::MissingToken)?;

        let identity = AuthService::new(state.pool())
            .authenticate(token)
            .await
            .map_err(AuthRejection::Auth)?;

        Ok(Self(identity))
    }
}

/// Extractor that pulls the bearer token without validating it.
///
/// Unlike [`RequireAuth`] this never rejects: a missing or malformed header
/// yields `None`. Logout uses it so revocation still works for tokens that
/// have already expired server-side.
pub struct OptionalBearer(pub Option<String>);

impl<S> FromRequestParts<S> for OptionalBearer
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(bearer_token(parts).map(str::to_owned)))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
