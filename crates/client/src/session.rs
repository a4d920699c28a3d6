//! Client-side session state.
//!
//! The app holds one explicit state value, `Anonymous` or `Authenticated`,
//! and every transition goes through [`SessionManager`], which persists the
//! new state through the injected [`StoragePort`]. Restoring from the same
//! port reproduces the state, so a restart lands the user where they were.

use nexus_core::{AuthSession, Identity, Role};
use thiserror::Error;

use crate::storage::{StorageError, StoragePort};

/// Errors from session persistence.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The storage backend failed.
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    /// The session could not be serialized for storage.
    #[error("Session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// What the app knows about the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nobody is signed in.
    Anonymous,
    /// A user is signed in and holds a session token.
    Authenticated(AuthSession),
}

impl SessionState {
    /// The signed-in identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(session) => Some(&session.identity),
        }
    }

    /// The signed-in role, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.identity().map(|identity| identity.role)
    }
}

/// Owner of the session state and its persistence.
#[derive(Debug)]
pub struct SessionManager<P: StoragePort> {
    port: P,
    state: SessionState,
}

impl<P: StoragePort> SessionManager<P> {
    /// Restore the session from storage.
    ///
    /// A missing payload starts the app `Anonymous`. A corrupt or unreadable
    /// payload does the same instead of failing the boot; the user signs in
    /// again and the next transition overwrites the bad payload.
    pub fn restore(port: P) -> Self {
        let state = match port.load() {
            Ok(Some(payload)) => match serde_json::from_str::<AuthSession>(&payload) {
                Ok(session) => SessionState::Authenticated(session),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring corrupt session payload");
                    SessionState::Anonymous
                }
            },
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                tracing::warn!(error = %e, "Session storage unreadable");
                SessionState::Anonymous
            }
        };

        Self { port, state }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.state.identity()
    }

    /// The session token to send as a bearer header, if signed in.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Anonymous => None,
            SessionState::Authenticated(session) => Some(&session.token),
        }
    }

    /// Transition to `Authenticated` and persist the session.
    ///
    /// The in-memory state changes even when persistence fails, so the
    /// running app stays signed in and only a restart loses the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the session cannot be written to storage.
    pub fn sign_in(&mut self, session: AuthSession) -> Result<(), SessionError> {
        let payload = serde_json::to_string(&session)?;
        self.state = SessionState::Authenticated(session);
        self.port.store(&payload)?;
        Ok(())
    }

    /// Transition to `Anonymous` and clear storage.
    ///
    /// Local clearing is unconditional; revoking the token server-side is
    /// the API client's concern.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if storage cannot be cleared.
    pub fn sign_out(&mut self) -> Result<(), SessionError> {
        self.state = SessionState::Anonymous;
        self.port.clear()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nexus_core::{UserId, Username};

    use super::*;
    use crate::storage::MemoryStorage;

    fn session(username: &str, role: Role) -> AuthSession {
        AuthSession {
            identity: Identity {
                id: UserId::from(7),
                username: Username::parse(username).unwrap(),
                role,
            },
            token: "tok-123".to_string(),
        }
    }

    #[test]
    fn test_restore_from_empty_storage_is_anonymous() {
        let manager = SessionManager::restore(MemoryStorage::new());
        assert_eq!(manager.state(), &SessionState::Anonymous);
        assert_eq!(manager.identity(), None);
        assert_eq!(manager.token(), None);
    }

    #[test]
    fn test_sign_in_persists_across_restore() {
        let storage = MemoryStorage::new();
        let session = session("alice", Role::Merchant);

        let mut manager = SessionManager::restore(storage.clone());
        manager.sign_in(session.clone()).unwrap();
        assert_eq!(manager.token(), Some("tok-123"));

        // A second manager over the same storage handle sees what a
        // restarted app would see.
        let restored = SessionManager::restore(storage);
        assert_eq!(
            restored.state(),
            &SessionState::Authenticated(session.clone())
        );
        assert_eq!(restored.identity(), Some(&session.identity));
    }

    #[test]
    fn test_sign_out_clears_storage() {
        let storage = MemoryStorage::new();

        let mut manager = SessionManager::restore(storage.clone());
        manager.sign_in(session("bob", Role::Customer)).unwrap();
        manager.sign_out().unwrap();
        assert_eq!(manager.state(), &SessionState::Anonymous);

        let restored = SessionManager::restore(storage);
        assert_eq!(restored.state(), &SessionState::Anonymous);
    }

    #[test]
    fn test_restore_ignores_corrupt_payload() {
        let storage = MemoryStorage::new();
        storage.store("not json at all").unwrap();

        let manager = SessionManager::restore(storage);
        assert_eq!(manager.state(), &SessionState::Anonymous);
    }

    #[test]
    fn test_session_state_role() {
        assert_eq!(SessionState::Anonymous.role(), None);
        assert_eq!(
            SessionState::Authenticated(session("carol", Role::Merchant)).role(),
            Some(Role::Merchant)
        );
    }
}
