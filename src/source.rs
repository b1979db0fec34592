//! Where moves come from: scripted pickers for the engine-driven side and a
//! channel handoff for human input.

use std::sync::mpsc::{self, Receiver, SyncSender};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::logic::LegalMoves;
use crate::types::Position;

/// Picks one destination out of the currently marked legal moves.
///
/// Implementations must return a marked position. `None` means the source
/// has nothing to offer (for instance, its input side hung up).
pub trait MoveSource: Send {
    fn choose_move(&mut self, legal: &LegalMoves) -> Option<Position>;
}

/// Always picks the first legal position in row-major order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSource;

impl MoveSource for FirstLegalMoveSource {
    fn choose_move(&mut self, legal: &LegalMoves) -> Option<Position> {
        legal.positions().first().copied()
    }
}

/// Picks uniformly among the legal positions.
#[derive(Debug, Clone)]
pub struct RandomMoveSource {
    rng: StdRng,
}

impl RandomMoveSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMoveSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSource for RandomMoveSource {
    fn choose_move(&mut self, legal: &LegalMoves) -> Option<Position> {
        let choice = legal.positions().choose(&mut self.rng).copied();
        debug!(?choice, candidates = legal.len(), "random source picked");
        choice
    }
}

/// Receiving end of a human input handoff. `choose_move` blocks until the
/// matching [`MoveSender`] posts a coordinate.
#[derive(Debug)]
pub struct ChannelMoveSource {
    rx: Receiver<Position>,
}

/// Producing end of a human input handoff; cheap to clone into input threads.
#[derive(Debug, Clone)]
pub struct MoveSender {
    tx: SyncSender<Position>,
}

impl ChannelMoveSource {
    /// Creates a connected pair with room for a single pending coordinate.
    pub fn pair() -> (MoveSender, ChannelMoveSource) {
        let (tx, rx) = mpsc::sync_channel(1);
        (MoveSender { tx }, ChannelMoveSource { rx })
    }
}

impl MoveSource for ChannelMoveSource {
    fn choose_move(&mut self, _legal: &LegalMoves) -> Option<Position> {
        // Legality is checked by the engine so a bad click is just re-prompted.
        self.rx.recv().ok()
    }
}

impl MoveSender {
    /// Posts a coordinate, waiting while one is already pending. Returns
    /// `false` once the receiving side is gone.
    pub fn send(&self, position: Position) -> bool {
        self.tx.send(position).is_ok()
    }
}
