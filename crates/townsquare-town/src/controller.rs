//! The town controller: one town's state and every cross-cutting
//! behavior.
//!
//! # Concurrency note
//!
//! `TownController` is NOT thread-safe by itself — plain `HashMap`s, no
//! interior locking. The registry wraps each controller in a
//! `tokio::sync::Mutex`, which gives every town single-writer-at-a-time
//! semantics while distinct towns proceed in parallel. Keeping the
//! controller lock-free avoids hidden double locking.

use std::collections::HashMap;
use std::sync::Arc;

use townsquare_game::{Board, GameError, GameStart, TicTacToe};
use townsquare_session::{ids, Player, PlayerSession, VideoClient};
use townsquare_types::{Location, PlayerId, TownId};

use crate::{
    GameResult, Leaderboard, ListenerId, ScoreEntry, TownError, TownEvent, TownEventSender,
};

/// Fixed occupancy ceiling reported in town listings.
pub const TOWN_CAPACITY: usize = 50;

/// The outcome of a move submitted through a town.
///
/// A rejected move is a value, not an error — callers pattern-match the
/// outcome instead of catching, and a rejection can never be mistaken
/// for a board. Nothing mutates on `Rejected`.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// The move was applied and the game continues.
    InPlay { board: Board },

    /// The move was applied and ended the game; the board is the final
    /// grid, captured before the engine reset.
    GameOver { board: Board },

    /// The engine rejected the move; state is unchanged.
    Rejected(GameError),
}

/// Implements the logic for one town: admitting and removing players,
/// relaying moves to the game engine, scoring, and fanning every state
/// change out to listeners.
pub struct TownController<V: VideoClient> {
    town_id: TownId,
    friendly_name: String,
    update_secret: String,
    publicly_listed: bool,
    capacity: usize,

    /// Players currently in the town.
    players: HashMap<PlayerId, Player>,

    /// Live sessions keyed by session token.
    /// Invariant: `players` and `sessions` move in lockstep — every
    /// session's player is in `players`, every player has exactly one
    /// session.
    sessions: HashMap<String, PlayerSession>,

    /// Subscribers to town events.
    listeners: HashMap<ListenerId, TownEventSender>,

    leaderboard: Leaderboard,
    game: TicTacToe,
    video: Arc<V>,
}

impl<V: VideoClient> TownController<V> {
    /// Creates a town with a fresh id and update secret.
    pub fn new(friendly_name: impl Into<String>, publicly_listed: bool, video: Arc<V>) -> Self {
        Self {
            town_id: ids::town_id(),
            friendly_name: friendly_name.into(),
            update_secret: ids::town_secret(),
            publicly_listed,
            capacity: TOWN_CAPACITY,
            players: HashMap::new(),
            sessions: HashMap::new(),
            listeners: HashMap::new(),
            leaderboard: Leaderboard::new(),
            game: TicTacToe::new(),
            video,
        }
    }

    // -- Accessors ---------------------------------------------------------

    pub fn town_id(&self) -> &TownId {
        &self.town_id
    }

    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    pub fn set_friendly_name(&mut self, name: impl Into<String>) {
        self.friendly_name = name.into();
    }

    pub fn publicly_listed(&self) -> bool {
        self.publicly_listed
    }

    pub fn set_publicly_listed(&mut self, listed: bool) {
        self.publicly_listed = listed;
    }

    /// The secret that authorizes update/delete. Never listed externally.
    pub fn update_secret(&self) -> &str {
        &self.update_secret
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Occupancy as reported in listings: the number of subscribed
    /// listeners, one per connected client.
    pub fn occupancy(&self) -> usize {
        self.listeners.len()
    }

    pub fn players(&self) -> Vec<&Player> {
        self.players.values().collect()
    }

    /// Looks up a live session by its token.
    pub fn session_by_token(&self, token: &str) -> Option<&PlayerSession> {
        self.sessions.get(token)
    }

    // -- Player lifecycle --------------------------------------------------

    /// Admits a player: provisions the video credential, creates and
    /// registers the session, seeds a zero score, and notifies
    /// listeners.
    ///
    /// The credential is acquired FIRST — a provisioning failure aborts
    /// the join with no partial registration and no events.
    ///
    /// # Errors
    /// [`TownError::Video`] when the media collaborator fails.
    pub async fn add_player(&mut self, player: Player) -> Result<PlayerSession, TownError> {
        let video_token = self
            .video
            .get_token_for_town(&self.town_id, &player.id)
            .await?;

        let session = PlayerSession::new(player.clone(), video_token);
        self.leaderboard.add_player(&player);
        self.players.insert(player.id.clone(), player.clone());
        self.sessions
            .insert(session.session_token.clone(), session.clone());

        tracing::info!(
            town_id = %self.town_id,
            player_id = %player.id,
            players = self.players.len(),
            "player joined"
        );
        self.broadcast(TownEvent::PlayerJoined(player));

        Ok(session)
    }

    /// Destroys all data related to a player: session, player entry,
    /// leaderboard row. Notifies listeners of the disconnect. Safe to
    /// call again for an already-removed session — it does nothing.
    pub fn destroy_session(&mut self, session: &PlayerSession) {
        let Some(session) = self.sessions.remove(&session.session_token) else {
            return;
        };
        self.players.remove(&session.player.id);
        self.leaderboard.remove_player(&session.player.id);

        tracing::info!(
            town_id = %self.town_id,
            player_id = %session.player.id,
            players = self.players.len(),
            "player left"
        );
        self.broadcast(TownEvent::PlayerDisconnected(session.player));
    }

    /// Updates a player's position and notifies listeners. No effect on
    /// game state; unknown players are ignored.
    pub fn update_player_location(&mut self, player_id: &PlayerId, location: Location) {
        let Some(player) = self.players.get_mut(player_id) else {
            return;
        };
        player.update_location(location);
        let snapshot = player.clone();

        // Keep the session's embedded copy current too.
        if let Some(session) = self
            .sessions
            .values_mut()
            .find(|s| s.player.id == *player_id)
        {
            session.player.location = location;
        }

        self.broadcast(TownEvent::PlayerMoved(snapshot));
    }

    // -- Listeners ---------------------------------------------------------

    /// Subscribes to events from this town. Callers should unsubscribe
    /// with [`remove_town_listener`](Self::remove_town_listener) when
    /// they no longer want them.
    pub fn add_town_listener(&mut self, sender: TownEventSender) -> ListenerId {
        let id = ListenerId::next();
        self.listeners.insert(id, sender);
        id
    }

    /// Unsubscribes. Removing an id that was never registered (or was
    /// already removed) is a no-op.
    pub fn remove_town_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    /// Sends `event` to every listener. Delivery is fire-and-forget:
    /// a closed receiver is logged and skipped, and never prevents the
    /// remaining listeners from being notified.
    fn broadcast(&self, event: TownEvent) {
        for (id, sender) in &self.listeners {
            if sender.send(event.clone()).is_err() {
                tracing::debug!(
                    town_id = %self.town_id,
                    listener = %id,
                    "listener channel closed, event dropped"
                );
            }
        }
    }

    // -- Game orchestration ------------------------------------------------

    /// Seats `player_id` in the game. Listeners see the fresh board and
    /// the new turn holder.
    ///
    /// # Errors
    /// - [`TownError::PlayerNotInTown`] — the id is not a current player
    /// - [`TownError::UnableToStartGame`] — the engine rejected the
    ///   start; the specific engine failure stays in the log
    pub fn start_game(&mut self, player_id: &PlayerId) -> Result<GameStart, TownError> {
        if !self.players.contains_key(player_id) {
            return Err(TownError::PlayerNotInTown(player_id.clone()));
        }

        match self.game.start_game(player_id.clone()) {
            Ok(start) => {
                self.broadcast(TownEvent::BoardUpdated(*self.game.board()));
                self.broadcast(TownEvent::Turn(self.game.current_player().cloned()));
                Ok(start)
            }
            Err(err) => {
                tracing::warn!(
                    town_id = %self.town_id,
                    %player_id,
                    error = %err,
                    "game start rejected"
                );
                Err(TownError::UnableToStartGame)
            }
        }
    }

    /// Submits a move for the current turn holder.
    ///
    /// On an applied move listeners see the updated board; if the move
    /// ended the game the winner (if any) is awarded one point, the game
    /// is finalized, and the final board comes back as
    /// [`MoveOutcome::GameOver`]. Rejections come back as
    /// [`MoveOutcome::Rejected`] with nothing mutated.
    pub fn make_move(&mut self, x: usize, y: usize) -> MoveOutcome {
        if let Err(err) = self.game.make_move(x, y) {
            tracing::debug!(town_id = %self.town_id, x, y, error = %err, "move rejected");
            return MoveOutcome::Rejected(err);
        }

        let board = *self.game.board();
        self.broadcast(TownEvent::BoardUpdated(board));

        if !self.game.is_active() {
            // A draw's NoWinner is the expected outcome — no award.
            if let Ok(winner) = self.game.winner() {
                let winner = winner.clone();
                self.leaderboard.update_score(&winner, 1);
            }
            self.end_game();
            MoveOutcome::GameOver { board }
        } else {
            self.broadcast(TownEvent::Turn(self.game.current_player().cloned()));
            MoveOutcome::InPlay { board }
        }
    }

    /// Announces the result to listeners and resets the engine.
    ///
    /// The winner must be read before the reset — the engine keeps it
    /// only until the next game activates.
    pub fn end_game(&mut self) {
        let result = match self.game.winner() {
            Ok(winner) => GameResult::Winner(winner.clone()),
            Err(_) => GameResult::Draw,
        };
        tracing::info!(town_id = %self.town_id, result = ?result, "game over");
        self.broadcast(TownEvent::GameEnded(result));
        self.game.reset();
    }

    /// Tells every listener the town is going away. Called only by the
    /// registry during deletion.
    pub fn disconnect_all_players(&mut self) {
        tracing::info!(town_id = %self.town_id, "town destroyed");
        self.broadcast(TownEvent::TownDestroyed);
    }

    // -- Game reads --------------------------------------------------------

    pub fn is_game_active(&self) -> bool {
        self.game.is_active()
    }

    pub fn current_player(&self) -> Option<&PlayerId> {
        self.game.current_player()
    }

    /// # Errors
    /// [`GameError::NoWinner`] when no winning line is recorded (normal
    /// after a draw).
    pub fn winner(&self) -> Result<&PlayerId, GameError> {
        self.game.winner()
    }

    pub fn board(&self) -> Board {
        *self.game.board()
    }

    // -- Leaderboard -------------------------------------------------------

    /// The town's top scores.
    pub fn scores(&self) -> Vec<ScoreEntry> {
        self.leaderboard.top_scores()
    }

    /// Awards `points` and returns the refreshed top scores.
    pub fn update_leaderboard(&mut self, player_id: &PlayerId, points: i64) -> Vec<ScoreEntry> {
        self.leaderboard.update_score(player_id, points);
        self.leaderboard.top_scores()
    }
}

// =========================================================================
// Tests
// =========================================================================
