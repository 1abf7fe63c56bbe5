//! Listener subscriptions: how town state changes reach the transport
//! layer.
//!
//! A listener is not a callback object — it is an unbounded mpsc sender
//! the subscriber hands to the town. Broadcasting is a synchronous,
//! fire-and-forget send per subscriber: a closed or slow receiver can
//! neither block nor fail the state mutation that triggered the event,
//! and one dead subscriber never prevents the others from being
//! notified.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use townsquare_game::Board;
use townsquare_session::Player;
use townsquare_types::PlayerId;

/// Counter for generating unique listener ids.
static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one subscription so it can later be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListenerId(pub u64);

impl ListenerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L-{}", self.0)
    }
}

/// Channel sender a subscriber registers to receive [`TownEvent`]s.
pub type TownEventSender = mpsc::UnboundedSender<TownEvent>;

/// How a game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    Draw,
}

/// A state change broadcast to every listener of a town.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TownEvent {
    /// A player was admitted to the town.
    PlayerJoined(Player),

    /// A player's session was destroyed.
    PlayerDisconnected(Player),

    /// A player's position changed. No game-state effect.
    PlayerMoved(Player),

    /// The game board changed (a game started or a move was applied).
    BoardUpdated(Board),

    /// The turn passed. `None` while no game is active (e.g. the first
    /// participant is still waiting for an opponent).
    Turn(Option<PlayerId>),

    /// The game finished with a winner or a draw.
    GameEnded(GameResult),

    /// The town is being deleted; no further events will follow.
    TownDestroyed,
}

// =========================================================================
// Tests
// =========================================================================
