//! Town orchestration for Townsquare.
//!
//! A town is an isolated multi-participant space: its own players,
//! sessions, listeners, one game engine, and one leaderboard. This
//! crate owns all the invariants that tie those together — lockstep
//! player/session maps, exactly one active game per town, winner
//! scoring on game over — and the process-wide registry that hosts
//! every town.
//!
//! # Key types
//!
//! - [`TownController`] — one town's state and all cross-cutting behavior
//! - [`TownRegistry`] — process-wide directory of towns
//! - [`TownEvent`] — what listeners receive when a town changes
//! - [`Leaderboard`] — per-town cumulative scores
//! - [`MoveOutcome`] — applied-vs-rejected result of a move

mod controller;
mod error;
mod leaderboard;
mod listener;
mod registry;

pub use controller::{MoveOutcome, TownController, TOWN_CAPACITY};
pub use error::{RegistryError, TownError};
pub use leaderboard::{Leaderboard, ScoreEntry};
pub use listener::{GameResult, ListenerId, TownEvent, TownEventSender};
pub use registry::{TownHandle, TownRegistry, TownSummary};
