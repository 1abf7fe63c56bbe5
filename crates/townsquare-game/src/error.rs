//! Error types for the game engine.

use townsquare_types::PlayerId;

/// Every way a game operation can be rejected.
///
/// Rejections never leave partial state behind — a rejected move or
/// start leaves the engine exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A move was submitted while no game is running.
    #[error("game is not active")]
    NotActive,

    /// `start_game` was called while a game is already running.
    #[error("game is already active")]
    AlreadyActive,

    /// The sole seated participant tried to start against themselves.
    #[error("a game needs two distinct players")]
    InvalidPlayers,

    /// Coordinates outside the 3×3 grid.
    #[error("cell ({x}, {y}) is outside the 3x3 board")]
    OutOfBounds { x: usize, y: usize },

    /// The target cell already carries a mark.
    #[error("cell ({x}, {y}) is already marked")]
    CellOccupied { x: usize, y: usize },

    /// No winning line has been recorded. Expected after a draw —
    /// callers treat this as a normal condition, not a fault.
    #[error("no winner")]
    NoWinner,

    /// The submitting participant does not hold the current turn.
    /// Produced by the registry's turn check, never by the engine itself.
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),
}
