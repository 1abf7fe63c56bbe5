//! Player identity and session credentials for Townsquare.
//!
//! This crate covers three concerns:
//!
//! 1. **Value types** — [`Player`] (who is in a town) and
//!    [`PlayerSession`] (the credential binding a connected client to a
//!    player).
//! 2. **Id generation** — the [`ids`] module hands out unguessable
//!    player ids, friendly town ids, session tokens, and update secrets.
//! 3. **Video provisioning** — the [`VideoClient`] trait, the external
//!    collaborator a town controller calls to acquire a per-session
//!    media credential during a join.
//!
//! # How it fits in the stack
//!
//! ```text
//! Town layer (above)   ← owns players and sessions, calls VideoClient
//!     ↕
//! Session layer (this crate)
//!     ↕
//! Types layer (below)  ← provides TownId, PlayerId, Location
//! ```

#![allow(async_fn_in_trait)]

pub mod ids;
mod player;
mod session;
mod video;

pub use player::Player;
pub use session::PlayerSession;
pub use video::{VideoClient, VideoError};
