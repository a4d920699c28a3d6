//! The signed-in user's identity.

use serde::{Deserialize, Serialize};

use crate::types::{Role, UserId, Username};

/// Minimal data identifying an account.
///
/// This is what registration and login hand back, and what the client keeps
/// while signed in. The password hash never travels with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User's database ID.
    pub id: UserId,
    /// Unique username.
    pub username: Username,
    /// Account role; drives which client view the user lands on.
    pub role: Role,
}
