use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Color;

pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Persistent content of a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    #[default]
    Empty,
    Black,
    White,
}

impl Occupancy {
    /// Swaps the two colors. `Empty` maps to itself.
    pub fn opposite(self) -> Self {
        match self {
            Occupancy::Empty => Occupancy::Empty,
            Occupancy::Black => Occupancy::White,
            Occupancy::White => Occupancy::Black,
        }
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Occupancy::Empty => None,
            Occupancy::Black => Some(Color::Black),
            Occupancy::White => Some(Color::White),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Occupancy::Empty
    }

    fn to_u8(self) -> u8 {
        match self {
            Occupancy::Empty => 0,
            Occupancy::Black => 1,
            Occupancy::White => 2,
        }
    }
}

impl From<Color> for Occupancy {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Occupancy::Black,
            Color::White => Occupancy::White,
        }
    }
}

/// Square N×N grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Occupancy>,
}

impl Board {
    /// Creates an empty board with `size` cells per edge.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Occupancy::Empty; size * size],
        }
    }

    /// Rebuilds a board from row-major cells. Returns `None` when the cell
    /// count is not `size * size`.
    pub fn from_cells(size: usize, cells: Vec<Occupancy>) -> Option<Self> {
        (cells.len() == size * size).then_some(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns whether signed coordinates fall on the board.
    pub fn contains(&self, x: isize, y: isize) -> bool {
        let size = self.size as isize;
        (0..size).contains(&x) && (0..size).contains(&y)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Occupancy> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Overwrites a cell. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, occupancy: Occupancy) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = occupancy;
        }
    }

    /// Empties every cell.
    pub fn reset(&mut self) {
        self.cells.fill(Occupancy::Empty);
    }

    pub fn cells(&self) -> &[Occupancy] {
        &self.cells
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u32, u32) {
        self.cells
            .iter()
            .fold((0, 0), |(black, white), cell| match cell {
                Occupancy::Black => (black + 1, white),
                Occupancy::White => (black, white + 1),
                Occupancy::Empty => (black, white),
            })
    }

    pub fn count_of(&self, color: Color) -> u32 {
        let (black, white) = self.count();
        match color {
            Color::Black => black,
            Color::White => white,
        }
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Converts the board to row-major bytes where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.to_u8()).collect()
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("  ")?;
        for x in 0..self.size {
            write!(f, " {}", (b'A' + x as u8) as char)?;
        }
        if self.size == 0 {
            return Ok(());
        }
        for (y, row) in self.cells.chunks(self.size).enumerate() {
            write!(f, "\n{:>2}", y + 1)?;
            for cell in row {
                let glyph = match cell {
                    Occupancy::Empty => '.',
                    Occupancy::Black => 'X',
                    Occupancy::White => 'O',
                };
                write!(f, " {glyph}")?;
            }
        }
        Ok(())
    }
}
