//! Authenticated-session types shared by the server and the client.

use serde::{Deserialize, Serialize};

use crate::types::Identity;

/// An identity plus the opaque bearer token that proves it.
///
/// This is the wire shape of successful register/login responses, and the
/// exact value the client persists through its storage port so a reload can
/// restore the session without re-authenticating. The identity fields are
/// flattened, so the JSON object has four flat keys: `id`, `username`,
/// `role`, and `token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Who is signed in.
    #[serde(flatten)]
    pub identity: Identity,
    /// Opaque bearer token, validated server-side on every authenticated
    /// request.
    pub token: String,
}
