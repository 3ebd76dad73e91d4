//! Session token claims.

use serde::{Deserialize, Serialize};

/// Claims carried by the session token issued on create/join.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// Player id, as a string per JWT convention
    pub sub: String,
    /// Game id the player belongs to
    pub gid: i64,
    /// Whether the player is the host at issue time
    pub host: bool,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl SessionClaims {
    pub fn player_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
