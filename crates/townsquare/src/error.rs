//! Unified error type for the Townsquare stack.

use townsquare_game::GameError;
use townsquare_session::VideoError;
use townsquare_town::{RegistryError, TownError};

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `townsquare` meta-crate, request handlers deal with
/// this single type instead of importing errors from each sub-crate.
/// The `#[from]` attributes auto-generate `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TownsquareError {
    /// A game-engine rejection (bad move, bad start, no winner).
    #[error(transparent)]
    Game(#[from] GameError),

    /// A media-provisioning failure from the external collaborator.
    #[error(transparent)]
    Video(#[from] VideoError),

    /// A town-level rejection (stranger starting a game, failed join).
    #[error(transparent)]
    Town(#[from] TownError),

    /// A registry-level failure (unknown town on a mutating path).
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
