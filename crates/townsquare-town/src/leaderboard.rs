//! Per-town cumulative score ranking.

use serde::{Deserialize, Serialize};
use townsquare_session::Player;
use townsquare_types::PlayerId;

/// Listings are truncated to this many entries.
const TOP_SCORES_LIMIT: usize = 10;

/// One participant's row in the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player_id: PlayerId,
    pub user_name: String,
    pub score: i64,
}

/// Scores for every participant seen in one town.
///
/// Lives as long as the owning town controller and is never reset;
/// entries survive across games and only disappear through
/// [`remove_player`](Self::remove_player).
#[derive(Debug, Default)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// Creates an empty leaderboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a participant with a starting score of zero.
    /// Idempotent — a participant already on the board is left alone.
    pub fn add_player(&mut self, player: &Player) {
        if self.entries.iter().any(|e| e.player_id == player.id) {
            return;
        }
        self.entries.push(ScoreEntry {
            player_id: player.id.clone(),
            user_name: player.user_name.clone(),
            score: 0,
        });
    }

    /// Adds `points` to the participant's score, creating an entry with
    /// exactly that score if the id has never been seen. The created
    /// entry's display name falls back to the id.
    pub fn update_score(&mut self, player_id: &PlayerId, points: i64) {
        match self.entries.iter_mut().find(|e| e.player_id == *player_id) {
            Some(entry) => entry.score += points,
            None => self.entries.push(ScoreEntry {
                player_id: player_id.clone(),
                user_name: player_id.0.clone(),
                score: points,
            }),
        }
    }

    /// The top entries, sorted non-increasing by score, at most ten.
    /// Ties keep registration order (stable sort).
    pub fn top_scores(&self) -> Vec<ScoreEntry> {
        let mut scores = self.entries.clone();
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores.truncate(TOP_SCORES_LIMIT);
        scores
    }

    /// Deletes the participant's entry entirely — a rejoin starts the
    /// participant back at zero.
    pub fn remove_player(&mut self, player_id: &PlayerId) {
        self.entries.retain(|e| e.player_id != *player_id);
    }

    /// Number of participants on the board.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nobody has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
