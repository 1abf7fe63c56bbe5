//! The turn-based game engine hosted by each town.
//!
//! One fixed variant: two players alternate marks on a 3×3 grid until a
//! straight line wins or the board fills. The engine is a plain state
//! machine with no knowledge of towns, sessions, or listeners — the
//! town controller owns one instance and orchestrates around it.
//!
//! # Key types
//!
//! - [`TicTacToe`] — the state machine itself
//! - [`Board`] / [`Cell`] — the 3×3 grid and its marks
//! - [`GameStart`] — what `start_game` hands back (waiting vs. started)
//! - [`GameError`] — every way an operation can be rejected

mod board;
mod engine;
mod error;

pub use board::{Board, Cell};
pub use engine::{GameStart, TicTacToe};
pub use error::GameError;
