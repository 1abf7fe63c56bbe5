//! The town registry: process-wide directory of town controllers.
//!
//! Explicitly constructed and dependency-injected — the embedding
//! process builds one registry, hands it its [`VideoClient`] and an
//! optional master secret, and passes it to request handlers. There is
//! no ambient global.
//!
//! Each town lives behind its own `Mutex`, so every operation against a
//! town runs to completion before the next is admitted for that same
//! town, while distinct towns proceed fully in parallel. The outer
//! `RwLock` guards only the directory map.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use townsquare_game::{Board, GameError, GameStart};
use townsquare_session::VideoClient;
use townsquare_types::{PlayerId, TownId};

use crate::{MoveOutcome, RegistryError, ScoreEntry, TownController};

/// Shared handle to one town's controller.
pub type TownHandle<V> = Arc<Mutex<TownController<V>>>;

/// A town's row in a public listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownSummary {
    pub town_id: TownId,
    pub friendly_name: String,
    pub current_occupancy: usize,
    pub maximum_occupancy: usize,
}

/// Directory of every town in the process.
pub struct TownRegistry<V: VideoClient> {
    towns: RwLock<HashMap<TownId, TownHandle<V>>>,
    video: Arc<V>,
    /// Operational override accepted wherever a per-town secret is
    /// checked. `None` disables the override entirely.
    master_secret: Option<String>,
}

impl<V: VideoClient> TownRegistry<V> {
    /// Creates an empty registry with no master secret.
    pub fn new(video: Arc<V>) -> Self {
        Self {
            towns: RwLock::new(HashMap::new()),
            video,
            master_secret: None,
        }
    }

    /// Creates an empty registry that also accepts `master_secret` in
    /// place of any town's update secret (operational recovery).
    pub fn with_master_secret(video: Arc<V>, master_secret: impl Into<String>) -> Self {
        Self {
            towns: RwLock::new(HashMap::new()),
            video,
            master_secret: Some(master_secret.into()),
        }
    }

    /// Creates and registers a new town. Always succeeds; the returned
    /// handle carries the fresh id and update secret.
    pub async fn create_town(
        &self,
        friendly_name: impl Into<String>,
        publicly_listed: bool,
    ) -> TownHandle<V> {
        let controller =
            TownController::new(friendly_name, publicly_listed, Arc::clone(&self.video));
        let town_id = controller.town_id().clone();
        let handle = Arc::new(Mutex::new(controller));
        self.towns
            .write()
            .await
            .insert(town_id.clone(), Arc::clone(&handle));
        tracing::info!(%town_id, "town created");
        handle
    }

    /// Resolves a town controller by id.
    pub async fn get(&self, town_id: &TownId) -> Option<TownHandle<V>> {
        self.towns.read().await.get(town_id).cloned()
    }

    /// Number of registered towns, listed or not.
    pub async fn town_count(&self) -> usize {
        self.towns.read().await.len()
    }

    /// Summaries of every publicly listed town.
    pub async fn list_towns(&self) -> Vec<TownSummary> {
        let handles: Vec<TownHandle<V>> = self.towns.read().await.values().cloned().collect();
        let mut summaries = Vec::with_capacity(handles.len());
        for handle in handles {
            let town = handle.lock().await;
            if town.publicly_listed() {
                summaries.push(TownSummary {
                    town_id: town.town_id().clone(),
                    friendly_name: town.friendly_name().to_string(),
                    current_occupancy: town.occupancy(),
                    maximum_occupancy: town.capacity(),
                });
            }
        }
        summaries
    }

    /// Applies the supplied fields to a town. Returns `false` — with
    /// nothing changed — on an unknown id, a bad secret, or an empty
    /// name. Omitted fields are left untouched.
    pub async fn update_town(
        &self,
        town_id: &TownId,
        secret: &str,
        new_name: Option<&str>,
        make_public: Option<bool>,
    ) -> bool {
        let Some(handle) = self.get(town_id).await else {
            return false;
        };
        let mut town = handle.lock().await;
        if !self.secret_matches(secret, town.update_secret()) {
            return false;
        }
        if let Some(name) = new_name {
            if name.is_empty() {
                return false;
            }
            town.set_friendly_name(name);
        }
        if let Some(listed) = make_public {
            town.set_publicly_listed(listed);
        }
        tracing::info!(%town_id, "town updated");
        true
    }

    /// Removes a town from the directory and disconnects everyone in
    /// it. Returns `false` on an unknown id or bad secret. Terminal —
    /// the controller is discarded and cannot be resurrected.
    pub async fn delete_town(&self, town_id: &TownId, secret: &str) -> bool {
        let Some(handle) = self.get(town_id).await else {
            return false;
        };
        {
            let town = handle.lock().await;
            if !self.secret_matches(secret, town.update_secret()) {
                return false;
            }
        }
        // Re-check under the write lock: a concurrent delete may have won.
        let Some(handle) = self.towns.write().await.remove(town_id) else {
            return false;
        };
        handle.lock().await.disconnect_all_players();
        tracing::info!(%town_id, "town deleted");
        true
    }

    // -- Leaderboard forwards ----------------------------------------------

    /// The named town's top scores, or `None` for an unknown town.
    pub async fn get_leaderboard(&self, town_id: &TownId) -> Option<Vec<ScoreEntry>> {
        let handle = self.get(town_id).await?;
        let town = handle.lock().await;
        Some(town.scores())
    }

    /// Awards points in the named town and returns the refreshed top
    /// scores, or `None` for an unknown town.
    pub async fn update_leaderboard(
        &self,
        town_id: &TownId,
        player_id: &PlayerId,
        points: i64,
    ) -> Option<Vec<ScoreEntry>> {
        let handle = self.get(town_id).await?;
        let mut town = handle.lock().await;
        Some(town.update_leaderboard(player_id, points))
    }

    // -- Game forwards -----------------------------------------------------

    /// # Errors
    /// [`RegistryError::TownNotFound`] for an unknown town, or the
    /// controller's rejection.
    pub async fn start_game(
        &self,
        town_id: &TownId,
        player_id: &PlayerId,
    ) -> Result<GameStart, RegistryError> {
        let handle = self.resolve(town_id).await?;
        let mut town = handle.lock().await;
        Ok(town.start_game(player_id)?)
    }

    /// `false` for an unknown town.
    pub async fn is_game_active(&self, town_id: &TownId) -> bool {
        match self.get(town_id).await {
            Some(handle) => handle.lock().await.is_game_active(),
            None => false,
        }
    }

    /// `None` for an unknown town or when no game is active.
    pub async fn current_player(&self, town_id: &TownId) -> Option<PlayerId> {
        let handle = self.get(town_id).await?;
        let town = handle.lock().await;
        town.current_player().cloned()
    }

    /// `None` for an unknown town, a draw, or no finished game.
    pub async fn get_winner(&self, town_id: &TownId) -> Option<PlayerId> {
        let handle = self.get(town_id).await?;
        let town = handle.lock().await;
        town.winner().ok().cloned()
    }

    /// The live board, or `None` for an unknown town.
    pub async fn get_board(&self, town_id: &TownId) -> Option<Board> {
        let handle = self.get(town_id).await?;
        let town = handle.lock().await;
        Some(town.board())
    }

    /// Submits a move on behalf of `player_id`.
    ///
    /// The registry verifies the submitter holds the current turn; a
    /// mismatch (including "no game active") comes back as
    /// [`MoveOutcome::Rejected`] without touching the board.
    ///
    /// # Errors
    /// [`RegistryError::TownNotFound`] for an unknown town.
    pub async fn make_move(
        &self,
        town_id: &TownId,
        player_id: &PlayerId,
        x: usize,
        y: usize,
    ) -> Result<MoveOutcome, RegistryError> {
        let handle = self.resolve(town_id).await?;
        let mut town = handle.lock().await;
        if town.current_player() != Some(player_id) {
            tracing::debug!(%town_id, %player_id, "move from non-turn-holder rejected");
            return Ok(MoveOutcome::Rejected(GameError::NotYourTurn(
                player_id.clone(),
            )));
        }
        Ok(town.make_move(x, y))
    }

    /// Finalizes the named town's game. `false` for an unknown town.
    pub async fn end_game(&self, town_id: &TownId) -> bool {
        match self.get(town_id).await {
            Some(handle) => {
                handle.lock().await.end_game();
                true
            }
            None => false,
        }
    }

    // -- Internals ---------------------------------------------------------

    async fn resolve(&self, town_id: &TownId) -> Result<TownHandle<V>, RegistryError> {
        self.get(town_id)
            .await
            .ok_or_else(|| RegistryError::TownNotFound(town_id.clone()))
    }

    fn secret_matches(&self, provided: &str, expected: &str) -> bool {
        provided == expected || self.master_secret.as_deref() == Some(provided)
    }
}
