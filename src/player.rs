use serde::{Deserialize, Serialize};

use crate::types::{Color, PlayerView};

/// One side's running score and its results across matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    color: Color,
    score: u32,
    wins: u32,
    losses: u32,
}

impl Player {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            score: 0,
            wins: 0,
            losses: 0,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Stones owned in the current match.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub(crate) fn reset_score(&mut self) {
        self.score = 0;
    }

    pub(crate) fn record_win(&mut self) {
        self.wins += 1;
    }

    pub(crate) fn record_loss(&mut self) {
        self.losses += 1;
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            color: self.color,
            score: self.score,
            wins: self.wins,
            losses: self.losses,
        }
    }
}
