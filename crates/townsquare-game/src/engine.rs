//! The two-player turn-based state machine.
//!
//! Lifecycle:
//!
//! ```text
//! empty ──(start A)──→ awaiting-second ──(start B)──→ active
//!   ↑                                                   │
//!   └───────────────(reset)────────── finished ←─(win / full board)
//! ```
//!
//! The engine is deliberately not thread-safe — the owning town
//! controller serializes access at a higher level, the same way the
//! session and room managers are guarded in the layers above.

use std::fmt;

use serde::{Deserialize, Serialize};
use townsquare_types::PlayerId;

use crate::{Board, Cell, GameError};

/// Which seat holds the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seat {
    First,
    Second,
}

impl Seat {
    fn mark(self) -> Cell {
        match self {
            Seat::First => Cell::First,
            Seat::Second => Cell::Second,
        }
    }

    fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// What `start_game` hands back on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStart {
    /// One participant is seated; the game starts once a second,
    /// distinct participant calls `start_game`.
    Waiting,

    /// Both seats are filled and the game is active. The first seat
    /// plays `X` and holds the opening turn.
    Started { first: PlayerId, second: PlayerId },
}

impl fmt::Display for GameStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStart::Waiting => write!(f, "waiting for a second player"),
            GameStart::Started { first, second } => {
                write!(f, "X: {first}, O: {second}")
            }
        }
    }
}

/// The game state machine hosted by a town.
///
/// Created once with its owning town controller and [`reset`](Self::reset)
/// between games, never recreated.
#[derive(Debug, Default)]
pub struct TicTacToe {
    first: Option<PlayerId>,
    second: Option<PlayerId>,
    board: Board,
    turn: Option<Seat>,
    active: bool,
    winner: Option<PlayerId>,
}

impl TicTacToe {
    /// Creates an engine in the empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats a participant, activating the game once two distinct
    /// participants have joined.
    ///
    /// # Errors
    /// - [`GameError::AlreadyActive`] — a game is already running
    /// - [`GameError::InvalidPlayers`] — the sole seated participant
    ///   re-submitted their own id
    pub fn start_game(&mut self, player: PlayerId) -> Result<GameStart, GameError> {
        let Some(first) = &self.first else {
            tracing::debug!(%player, "first seat taken, waiting for an opponent");
            self.first = Some(player);
            return Ok(GameStart::Waiting);
        };

        if self.active {
            return Err(GameError::AlreadyActive);
        }
        if *first == player {
            return Err(GameError::InvalidPlayers);
        }

        let start = GameStart::Started {
            first: first.clone(),
            second: player.clone(),
        };
        self.second = Some(player);
        self.active = true;
        self.winner = None;
        self.turn = Some(Seat::First);
        tracing::info!(%start, "game started");
        Ok(start)
    }

    /// Returns `true` while a game is running.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The participant holding the current turn, or `None` when no game
    /// is active.
    pub fn current_player(&self) -> Option<&PlayerId> {
        if !self.active {
            return None;
        }
        self.turn_holder()
    }

    /// Marks a cell for the current turn holder.
    ///
    /// A straight-line win or a full board finishes the game; otherwise
    /// the turn passes to the other participant. Rejections leave the
    /// board untouched.
    pub fn make_move(&mut self, x: usize, y: usize) -> Result<(), GameError> {
        if !self.active {
            return Err(GameError::NotActive);
        }
        if x >= 3 || y >= 3 {
            return Err(GameError::OutOfBounds { x, y });
        }
        if self.board[x][y] != Cell::Empty {
            return Err(GameError::CellOccupied { x, y });
        }

        let seat = self.turn.unwrap_or(Seat::First);
        self.board[x][y] = seat.mark();

        if has_line(&self.board, seat.mark()) {
            self.winner = self.turn_holder().cloned();
            self.active = false;
            if let Some(winner) = &self.winner {
                tracing::info!(%winner, "game won");
            }
        } else if is_full(&self.board) {
            self.active = false;
            tracing::info!("board full, game drawn");
        } else {
            self.turn = Some(seat.other());
        }

        Ok(())
    }

    /// The recorded winner of the last finished game.
    ///
    /// # Errors
    /// [`GameError::NoWinner`] when no winning line has been recorded —
    /// including after a draw, where it is the expected outcome.
    pub fn winner(&self) -> Result<&PlayerId, GameError> {
        self.winner.as_ref().ok_or(GameError::NoWinner)
    }

    /// The live grid, readable in every state.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Clears the board, both seats, and the active flag, returning to
    /// the empty state.
    ///
    /// The recorded winner is deliberately NOT cleared here: the owning
    /// controller reads it before resetting, and the next activation
    /// clears it in `start_game`.
    pub fn reset(&mut self) {
        self.board = Board::default();
        self.first = None;
        self.second = None;
        self.active = false;
        self.turn = None;
        tracing::debug!("game reset");
    }

    /// The participant in the turn seat, ignoring the active flag.
    fn turn_holder(&self) -> Option<&PlayerId> {
        match self.turn? {
            Seat::First => self.first.as_ref(),
            Seat::Second => self.second.as_ref(),
        }
    }
}

/// Does `mark` complete any row, column, or diagonal?
fn has_line(b: &Board, mark: Cell) -> bool {
    (0..3).any(|x| (0..3).all(|y| b[x][y] == mark))
        || (0..3).any(|y| (0..3).all(|x| b[x][y] == mark))
        || (0..3).all(|i| b[i][i] == mark)
        || (0..3).all(|i| b[i][2 - i] == mark)
}

fn is_full(b: &Board) -> bool {
    b.iter().all(|row| row.iter().all(|c| *c != Cell::Empty))
}

// =========================================================================
// Tests
// =========================================================================
