//! The session value type.

use serde::{Deserialize, Serialize};

use crate::{ids, Player};

/// A credential-bearing handle binding a connected client to a player.
///
/// Created exactly once per successful join — after video provisioning
/// has succeeded — and invalidated on disconnect. A session token maps
/// to at most one live session, and the embedded player must exist in
/// the owning town's player set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSession {
    /// Unguessable secret the client presents on subsequent requests.
    pub session_token: String,

    /// The player this session belongs to.
    pub player: Player,

    /// Per-session credential for the external media service.
    pub video_token: String,
}

impl PlayerSession {
    /// Creates a session for `player` with a fresh token.
    pub fn new(player: Player, video_token: impl Into<String>) -> Self {
        tracing::debug!(player_id = %player.id, "session created");
        Self {
            session_token: ids::session_token(),
            player,
            video_token: video_token.into(),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
