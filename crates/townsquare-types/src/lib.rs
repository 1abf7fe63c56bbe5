//! Shared vocabulary for Townsquare.
//!
//! Every other crate in the workspace speaks in these types: opaque
//! identifiers for towns and players, and the 2D location a player
//! occupies inside a town. Nothing here has behavior beyond identity
//! and formatting — the types exist so a `TownId` can never be passed
//! where a `PlayerId` is expected.

mod types;

pub use types::{Location, PlayerId, TownId};
