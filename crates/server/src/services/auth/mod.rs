//! Authentication service.
//!
//! Password registration and login, plus the opaque bearer tokens that
//! authenticated requests carry.

mod error;

pub use error::AuthError;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use rand::RngCore;
use sqlx::SqlitePool;

use nexus_core::{AuthSession, Identity, Role, Username};

use crate::db::RepositoryError;
use crate::db::sessions::SessionRepository;
use crate::db::users::UserRepository;

/// bcrypt work factor for password hashing.
const BCRYPT_COST: u32 = 10;

/// How long a session token stays valid.
const SESSION_TTL_DAYS: i64 = 7;

/// Random bytes per session token (encodes to 43 base64url characters).
const TOKEN_BYTES: usize = 32;

/// Authentication service.
///
/// Handles user registration, login, and bearer-token sessions.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    sessions: SessionRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
            sessions: SessionRepository::new(pool),
        }
    }

    /// Register a new user and sign them in.
    ///
    /// The password is salted and hashed with bcrypt; plaintext never
    /// touches storage. There is no password or role validation beyond what
    /// the types enforce.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username is empty.
    /// Returns `AuthError::UsernameTaken` if the username is already registered.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<AuthSession, AuthError> {
        // Validate username
        let username = Username::parse(username)?;

        // Hash password
        let password_hash = hash_password(password)?;

        // Create user
        let identity = self
            .users
            .create(&username, &password_hash, role)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })?;

        self.open_session(identity).await
    }

    /// Login with username and password.
    ///
    /// Unknown usernames and wrong passwords are deliberately
    /// indistinguishable: both come back as `InvalidCredentials`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username/password is wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AuthError> {
        // Unknown user and wrong password fall through to the same arm.
        let verified = match self.users.get_credential(username).await? {
            Some(credential) if verify_password(password, &credential.password_hash).is_ok() => {
                Some(credential)
            }
            _ => None,
        };

        let Some(credential) = verified else {
            tracing::warn!(username = %username, "Login failed");
            return Err(AuthError::InvalidCredentials);
        };

        self.open_session(credential.identity).await
    }

    /// Resolve a bearer token to the identity it was issued for.
    ///
    /// Expired sessions are deleted on the way out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidSession` if the token is unknown or expired.
    pub async fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        let record = self
            .sessions
            .find(token)
            .await?
            .ok_or(AuthError::InvalidSession)?;

        if record.expires_at <= Utc::now() {
            self.sessions.delete(token).await?;
            return Err(AuthError::InvalidSession);
        }

        Ok(record.identity)
    }

    /// Revoke a token. Unknown tokens are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the delete fails.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let deleted = self.sessions.delete(token).await?;
        if !deleted {
            tracing::warn!("Logout for a token that was not stored");
        }
        Ok(())
    }

    /// Mint a token for an identity and persist the session row.
    async fn open_session(&self, identity: Identity) -> Result<AuthSession, AuthError> {
        let token = mint_token();
        let now = Utc::now();
        self.sessions
            .create(&token, identity.id, now, now + Duration::days(SESSION_TTL_DAYS))
            .await?;

        Ok(AuthSession { identity, token })
    }
}

/// Generate a fresh opaque session token.
fn mint_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hash a password using bcrypt with a per-password random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    match bcrypt::verify(password, hash) {
        Ok(true) => Ok(()),
        Ok(false) | Err(_) => Err(AuthError::InvalidCredentials),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    use nexus_core::UserId;

    #[tokio::test]
    async fn test_register_then_login_same_identity() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        let registered = auth.register("alice", "pw123", Role::Merchant).await.unwrap();
        assert_eq!(registered.identity.id, UserId::new(1));
        assert_eq!(registered.identity.username.as_str(), "alice");
        assert_eq!(registered.identity.role, Role::Merchant);
        assert!(!registered.token.is_empty());

        let logged_in = auth.login("alice", "pw123").await.unwrap();
        assert_eq!(logged_in.identity, registered.identity);
        // Each login gets its own token.
        assert_ne!(logged_in.token, registered.token);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected_regardless_of_role_and_password() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        auth.register("alice", "pw123", Role::Merchant).await.unwrap();
        let err = auth
            .register("alice", "different", Role::Customer)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_empty_username_rejected() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        let err = auth.register("", "pw123", Role::Customer).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidUsername(_)));
    }

    #[tokio::test]
    async fn test_empty_password_is_accepted() {
        // Password strength is explicitly not validated.
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        auth.register("alice", "", Role::Customer).await.unwrap();
        auth.login("alice", "").await.unwrap();
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        auth.register("alice", "pw123", Role::Merchant).await.unwrap();

        let wrong_password = auth.login("alice", "nope").await.unwrap_err();
        let unknown_user = auth.login("mallory", "pw123").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_authenticate_resolves_token() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        let session = auth.register("alice", "pw123", Role::Customer).await.unwrap();
        let identity = auth.authenticate(&session.token).await.unwrap();
        assert_eq!(identity, session.identity);

        let err = auth.authenticate("not-a-token").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidSession));
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        let session = auth.register("alice", "pw123", Role::Customer).await.unwrap();
        auth.logout(&session.token).await.unwrap();

        let err = auth.authenticate(&session.token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidSession));

        // Logging out again is a no-op.
        auth.logout(&session.token).await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_session_rejected_and_deleted() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);
        let sessions = SessionRepository::new(&pool);

        let session = auth.register("alice", "pw123", Role::Customer).await.unwrap();
        let stale = Utc::now() - Duration::days(1);
        sessions
            .create("old-token", session.identity.id, stale - Duration::days(7), stale)
            .await
            .unwrap();

        let err = auth.authenticate("old-token").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidSession));
        // The expired row is cleaned up on lookup.
        assert!(sessions.find("old-token").await.unwrap().is_none());
    }

    #[test]
    fn test_minted_tokens_are_unique_and_url_safe() {
        let first = mint_token();
        let second = mint_token();

        assert_ne!(first, second);
        assert_eq!(first.len(), 43);
        assert!(
            first
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_password_hash_verifies() {
        let hash = hash_password("pw123").unwrap();
        assert_ne!(hash, "pw123");
        assert!(verify_password("pw123", &hash).is_ok());
        assert!(matches!(
            verify_password("other", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
