//! The 3×3 grid and its cell marks.

use serde::{Deserialize, Serialize};

/// One cell of the grid.
///
/// Serializes as a digit — `0` empty, `1` the first participant's mark,
/// `2` the second's — which is the shape clients render directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    #[default]
    Empty,
    First,
    Second,
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => 0,
            Cell::First => 1,
            Cell::Second => 2,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::First),
            2 => Ok(Cell::Second),
            other => Err(format!("cell value must be 0, 1, or 2, got {other}")),
        }
    }
}

/// The full grid. Always exactly 3×3; indexed `[x][y]`.
pub type Board = [[Cell; 3]; 3];

// =========================================================================
// Tests
// =========================================================================
