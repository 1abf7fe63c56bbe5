//! The player value type.

use serde::{Deserialize, Serialize};
use townsquare_types::{Location, PlayerId};

use crate::ids;

/// An identified occupant of a town.
///
/// Created when a client joins, owned by the admitting town controller,
/// and removed from every collection on disconnect. Carries no behavior
/// beyond accessors and location updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Opaque unique id, generated at creation.
    pub id: PlayerId,

    /// Display name chosen by the client. Not unique.
    pub user_name: String,

    /// Last known 2D position inside the town.
    pub location: Location,
}

impl Player {
    /// Creates a player with a fresh id at the town origin.
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            id: ids::player_id(),
            user_name: user_name.into(),
            location: Location::default(),
        }
    }

    /// Records a new position.
    pub fn update_location(&mut self, location: Location) {
        self.location = location;
    }
}

// =========================================================================
// Tests
// =========================================================================
