//! Identity and location types.
//!
//! Town and player identifiers are opaque strings handed out by the
//! id-generation collaborator (`townsquare_session::ids`). The core
//! never inspects them — it only compares, hashes, and logs them.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a town.
///
/// Newtype over the generated id string. `#[serde(transparent)]` makes it
/// serialize as the bare string, so `TownId("1A2B3C4D")` is `"1A2B3C4D"`
/// on the wire, not `{ "0": "1A2B3C4D" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TownId(pub String);

impl fmt::Display for TownId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TownId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A unique identifier for a player.
///
/// Same newtype pattern as [`TownId`]. A player id is unguessable and
/// unique across the whole process, not just within one town.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A player's last known 2D position inside a town.
///
/// Purely informational — movement has no effect on game state, it is
/// only fanned out to listeners so other clients can render the player.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub x: f32,
    pub y: f32,
}

impl Location {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// =========================================================================
// Tests
// =========================================================================
