//! Video provisioning hook.
//!
//! Townsquare does not talk to a media provider itself — that is the
//! embedding process's job. The core defines the [`VideoClient`] trait:
//! a single async method that takes a town and player and returns a
//! media credential or an error. The town controller calls it during a
//! join, and a failure aborts the join before any state is committed.
//!
//! Tests and development builds plug in trivial implementations; a
//! production deployment wraps its provider SDK.

use townsquare_types::{PlayerId, TownId};

/// Provisions a per-session media credential for a player joining a town.
///
/// # Trait bounds
///
/// - `Send + Sync` — shared across the tasks serving different towns.
/// - `'static` — lives as long as the registry that holds it.
pub trait VideoClient: Send + Sync + 'static {
    /// Acquires a credential for `player_id` to join `town_id`'s media
    /// room.
    ///
    /// # Errors
    /// [`VideoError`] on any provider/network failure; the caller treats
    /// this as "the join did not happen".
    fn get_token_for_town(
        &self,
        town_id: &TownId,
        player_id: &PlayerId,
    ) -> impl std::future::Future<Output = Result<String, VideoError>> + Send;
}

/// Errors from the media-provisioning collaborator.
#[derive(Debug, thiserror::Error)]
pub enum VideoError {
    /// The provider rejected the request or could not be reached.
    #[error("video provisioning failed: {0}")]
    Provisioning(String),
}
