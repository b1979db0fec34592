//! Pure capture rules over a [`Board`].
//!
//! Legal destinations are kept in a [`LegalMoves`] overlay rather than in the
//! board itself, so the board only ever holds real stones.

use crate::board::{Board, Occupancy};
use crate::types::{Color, Position};

/// N, NE, E, SE, S, SW, W, NW as `(dx, dy)` with y growing downwards.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Per-cell "is a legal destination" marks for one side, recomputed every turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMoves {
    size: usize,
    marks: Vec<bool>,
}

impl LegalMoves {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            marks: vec![false; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns whether `(x, y)` is marked. Out-of-range coordinates never are.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.marks[y * self.size + x]
    }

    pub fn is_empty(&self) -> bool {
        !self.marks.iter().any(|&marked| marked)
    }

    pub fn len(&self) -> usize {
        self.marks.iter().filter(|&&marked| marked).count()
    }

    /// Marked positions in row-major order.
    pub fn positions(&self) -> Vec<Position> {
        self.marks
            .iter()
            .enumerate()
            .filter(|&(_, &marked)| marked)
            .map(|(idx, _)| Position::new(idx % self.size, idx / self.size))
            .collect()
    }

    fn clear(&mut self) {
        self.marks.fill(false);
    }

    fn mark(&mut self, x: usize, y: usize) {
        if x < self.size && y < self.size {
            self.marks[y * self.size + x] = true;
        }
    }
}

/// Returns whether any destination is marked.
pub fn has_legal_move(legal: &LegalMoves) -> bool {
    !legal.is_empty()
}

/// Returns whether `(x, y)` is a marked destination. `legal` must have been
/// refreshed by [`mark_legal_moves`] for the mover first.
pub fn is_legal_move(legal: &LegalMoves, x: usize, y: usize) -> bool {
    legal.contains(x, y)
}

/// Clears `legal` and marks every empty cell where `color` would bracket at
/// least one opposing stone.
pub fn mark_legal_moves(board: &Board, color: Color, legal: &mut LegalMoves) {
    if legal.size != board.size() {
        *legal = LegalMoves::new(board.size());
    } else {
        legal.clear();
    }

    let own = Occupancy::from(color);
    let size = board.size();
    for y in 0..size {
        for x in 0..size {
            if board.get(x, y) != Some(own) {
                continue;
            }
            for (dx, dy) in DIRECTIONS {
                if let Some(target) = walk_to_empty(board, own, x, y, dx, dy) {
                    legal.mark(target.x, target.y);
                }
            }
        }
    }
}

/// Flips every opposing run bracketed by `(x, y)` and another `color` stone.
/// The stone at `(x, y)` must already be placed by the caller; nothing is
/// re-validated, and directions without a bracket flip nothing.
/// Returns the flipped cells.
pub fn apply_move(board: &mut Board, color: Color, x: usize, y: usize) -> Vec<Position> {
    let own = Occupancy::from(color);
    let mut flipped = Vec::new();

    for (dx, dy) in DIRECTIONS {
        let run = bracketed_run(board, own, x, y, dx, dy);
        for pos in &run {
            board.set(pos.x, pos.y, own);
        }
        flipped.extend(run);
    }

    flipped
}

/// From `own` at `(x, y)`, walks across opposing stones and returns the first
/// empty cell reached, if at least one opposing stone was crossed.
fn walk_to_empty(
    board: &Board,
    own: Occupancy,
    x: usize,
    y: usize,
    dx: isize,
    dy: isize,
) -> Option<Position> {
    let opponent = own.opposite();
    let mut crossed = 0usize;
    let (mut cx, mut cy) = (x as isize + dx, y as isize + dy);

    while board.contains(cx, cy) {
        let (ux, uy) = (cx as usize, cy as usize);
        match board.get(ux, uy) {
            Some(cell) if cell == opponent => crossed += 1,
            Some(Occupancy::Empty) if crossed > 0 => return Some(Position::new(ux, uy)),
            _ => return None,
        }
        cx += dx;
        cy += dy;
    }

    None
}

/// Opposing stones between `(x, y)` and the next `own` stone along one
/// direction. Empty when the run is unterminated or hits an empty cell.
fn bracketed_run(
    board: &Board,
    own: Occupancy,
    x: usize,
    y: usize,
    dx: isize,
    dy: isize,
) -> Vec<Position> {
    let opponent = own.opposite();
    let mut run = Vec::new();
    let (mut cx, mut cy) = (x as isize + dx, y as isize + dy);

    while board.contains(cx, cy) {
        let (ux, uy) = (cx as usize, cy as usize);
        match board.get(ux, uy) {
            Some(cell) if cell == opponent => run.push(Position::new(ux, uy)),
            Some(cell) if cell == own => return run,
            _ => break,
        }
        cx += dx;
        cy += dy;
    }

    Vec::new()
}
