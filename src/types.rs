use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A board coordinate. `x` is the column, `y` the row, both 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Algebraic notation: column letter from 'A', then the 1-based row ("C4").
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column = u8::try_from(self.x)
            .ok()
            .and_then(|x| b'A'.checked_add(x))
            .filter(u8::is_ascii_uppercase)
            .ok_or(fmt::Error)?;
        write!(f, "{}{}", column as char, self.y + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid position notation: {0:?}")]
pub struct ParsePositionError(pub String);

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError(s.to_string());
        let mut chars = s.chars();
        let column = chars.next().ok_or_else(err)?.to_ascii_uppercase();
        if !column.is_ascii_uppercase() {
            return Err(err());
        }

        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let row: usize = digits.parse().map_err(|_| err())?;
        if row == 0 {
            return Err(err());
        }

        Ok(Self::new((column as u8 - b'A') as usize, row - 1))
    }
}

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    NotStarted,
    InProgress,
    Finished,
}

/// What a single call to `Othello::advance` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A stone was placed and `flipped` stones changed color.
    Moved {
        color: Color,
        position: Position,
        flipped: Vec<Position>,
    },
    /// `color` had no legal move and the turn passed.
    Passed { color: Color },
    /// The coordinate was not a legal destination. Nothing changed.
    Rejected,
    /// The engine-driven side's source has no more moves to give. Nothing
    /// changed and asking again will not help.
    SourceClosed,
    /// The match is over.
    Finished,
}

/// Read-only per-side state for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub color: Color,
    pub score: u32,
    pub wins: u32,
    pub losses: u32,
}

/// Read-only state handed to renderers and the WASM facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub size: usize,
    /// Row-major cells: 0=empty, 1=black, 2=white.
    pub cells: Vec<u8>,
    pub legal_moves: Vec<Position>,
    pub black: PlayerView,
    pub white: PlayerView,
    pub active: Color,
    pub round: u32,
    pub transcript: String,
    pub status: MatchStatus,
}
