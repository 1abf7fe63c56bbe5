//! # Townsquare
//!
//! Multi-tenant room registry hosting short two-player turn-based games
//! inside shared spaces ("towns"). Each town independently tracks
//! connected players, session credentials, one game instance, and a
//! score leaderboard, and fans every state change out to its listeners
//! — with no cross-town interference.
//!
//! This meta-crate re-exports the whole stack and adds the unified
//! [`TownsquareError`]. Transport, wire encoding, and media
//! provisioning live outside; the embedding process plugs them in via
//! the listener channels and the
//! [`VideoClient`](townsquare_session::VideoClient) trait.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use townsquare::prelude::*;
//!
//! # struct MyVideoProvider;
//! # impl VideoClient for MyVideoProvider {
//! #     async fn get_token_for_town(
//! #         &self,
//! #         _town_id: &TownId,
//! #         _player_id: &PlayerId,
//! #     ) -> Result<String, VideoError> {
//! #         Ok("token".into())
//! #     }
//! # }
//! # async fn run() {
//! let registry = TownRegistry::new(Arc::new(MyVideoProvider));
//! let town = registry.create_town("main square", true).await;
//! let session = town.lock().await.add_player(Player::new("alice")).await;
//! # let _ = session;
//! # }
//! ```

mod error;

pub use error::TownsquareError;

pub mod prelude {
    //! Everything a request handler needs, in one import.

    pub use townsquare_game::{Board, Cell, GameError, GameStart, TicTacToe};
    pub use townsquare_session::{ids, Player, PlayerSession, VideoClient, VideoError};
    pub use townsquare_town::{
        GameResult, Leaderboard, ListenerId, MoveOutcome, RegistryError, ScoreEntry,
        TownController, TownError, TownEvent, TownEventSender, TownHandle, TownRegistry,
        TownSummary, TOWN_CAPACITY,
    };
    pub use townsquare_types::{Location, PlayerId, TownId};

    pub use crate::TownsquareError;
}
