//! Error types for the town layer.

use townsquare_session::VideoError;
use townsquare_types::{PlayerId, TownId};

/// Errors from town controller operations.
#[derive(Debug, thiserror::Error)]
pub enum TownError {
    /// The named player is not currently in this town.
    #[error("player {0} is not part of this town")]
    PlayerNotInTown(PlayerId),

    /// The engine rejected a game start. The specific engine failure is
    /// logged at the controller and deliberately not carried here.
    #[error("unable to start game")]
    UnableToStartGame,

    /// Media provisioning failed; the join was aborted with nothing
    /// committed.
    #[error(transparent)]
    Video(#[from] VideoError),
}

/// Errors from registry operations that mutate a town.
///
/// Read-style lookups never use this — they return `None`/`false` for
/// unknown towns instead.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No town with this id exists in the directory.
    #[error("town {0} not found")]
    TownNotFound(TownId),

    /// The town controller rejected the forwarded operation.
    #[error(transparent)]
    Town(#[from] TownError),
}
