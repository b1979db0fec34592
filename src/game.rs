use std::fmt::Write as _;

use tracing::{debug, error, info, warn};

use crate::board::{Board, Occupancy};
use crate::config::{EngineKind, OthelloConfig, validate_board_size};
use crate::error::{ConfigError, SnapshotError};
use crate::logic::{LegalMoves, apply_move, has_legal_move, is_legal_move, mark_legal_moves};
use crate::player::Player;
use crate::snapshot::MatchSnapshot;
use crate::source::{FirstLegalMoveSource, MoveSource, RandomMoveSource};
use crate::types::{Color, GameView, MatchStatus, Position, Step};

/// The side whose moves come from a [`MoveSource`] instead of `advance`.
struct EngineSide {
    color: Color,
    source: Box<dyn MoveSource>,
}

/// Match controller: owns the board and both players and steps one match at
/// a time. Win/loss counters survive [`Othello::new_game`].
pub struct Othello {
    board: Board,
    legal: LegalMoves,
    black: Player,
    white: Player,
    active: Color,
    round: u32,
    passes: u32,
    status: MatchStatus,
    result_recorded: bool,
    transcript: String,
    engine: Option<EngineSide>,
}

impl Othello {
    /// Creates an engine where both sides move through [`Othello::advance`].
    /// `size` must be even and between 4 and 26.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        validate_board_size(size)?;
        Ok(Self::build(size))
    }

    /// Creates an engine where `color` is played by `source`.
    pub fn with_engine(
        size: usize,
        color: Color,
        source: Box<dyn MoveSource>,
    ) -> Result<Self, ConfigError> {
        let mut game = Self::new(size)?;
        game.engine = Some(EngineSide { color, source });
        Ok(game)
    }

    fn build(size: usize) -> Self {
        Self {
            board: Board::new(size),
            legal: LegalMoves::new(size),
            black: Player::new(Color::Black),
            white: Player::new(Color::White),
            active: Color::Black,
            round: 1,
            passes: 0,
            status: MatchStatus::NotStarted,
            result_recorded: false,
            transcript: String::new(),
            engine: None,
        }
    }

    pub fn from_config(config: &OthelloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let Some(color) = config.engine_side else {
            return Self::new(config.board_size);
        };

        let source: Box<dyn MoveSource> = match (config.engine, config.seed) {
            (EngineKind::First, _) => Box::new(FirstLegalMoveSource),
            (EngineKind::Random, Some(seed)) => Box::new(RandomMoveSource::seeded(seed)),
            (EngineKind::Random, None) => Box::new(RandomMoveSource::new()),
        };
        Self::with_engine(config.board_size, color, source)
    }

    /// Starts a fresh match: four center stones, Black to move.
    pub fn new_game(&mut self) {
        let half = self.board.size() / 2;

        self.transcript.clear();
        self.round = 1;
        self.passes = 0;
        self.result_recorded = false;
        self.active = Color::Black;
        self.black.reset_score();
        self.white.reset_score();

        self.board.reset();
        self.board.set(half - 1, half - 1, Occupancy::White);
        self.board.set(half, half, Occupancy::White);
        self.board.set(half - 1, half, Occupancy::Black);
        self.board.set(half, half - 1, Occupancy::Black);

        self.recalculate_scores();
        mark_legal_moves(&self.board, self.active, &mut self.legal);
        self.status = MatchStatus::InProgress;

        info!(
            size = self.board.size(),
            engine = ?self.engine_side(),
            "new match started"
        );
    }

    /// Plays one step for the active side.
    ///
    /// `(x, y)` is only consulted when the active side is not engine-driven.
    /// A coordinate that is not a legal destination leaves the match as it
    /// was and returns [`Step::Rejected`] so the caller can ask again.
    pub fn advance(&mut self, x: usize, y: usize) -> Step {
        if self.status == MatchStatus::NotStarted {
            debug!("advance called before new_game");
            return Step::Rejected;
        }
        if self.finish_if_over() {
            return Step::Finished;
        }

        if !has_legal_move(&self.legal) {
            return self.pass();
        }
        self.passes = 0;

        let mover = self.active;
        let engine_turn = self.engine_side() == Some(mover);
        let (x, y) = match self.engine.as_mut() {
            Some(engine) if engine.color == mover => match engine.source.choose_move(&self.legal) {
                Some(pos) => (pos.x, pos.y),
                None => {
                    warn!(color = %mover, "engine source returned no move");
                    return Step::SourceClosed;
                }
            },
            _ => (x, y),
        };

        if !is_legal_move(&self.legal, x, y) {
            if engine_turn {
                error!(color = %mover, x, y, "engine source chose an illegal move");
            } else {
                debug!(color = %mover, x, y, "rejected illegal move");
            }
            debug_assert!(!engine_turn, "engine source chose an illegal move ({x}, {y})");
            mark_legal_moves(&self.board, self.active, &mut self.legal);
            return Step::Rejected;
        }

        let position = Position::new(x, y);
        self.board.set(x, y, mover.into());
        let flipped = apply_move(&mut self.board, mover, x, y);
        self.recalculate_scores();
        if write!(self.transcript, "{position}").is_err() {
            error!(%mover, x, y, "move has no algebraic notation");
        }
        self.round += 1;
        self.active = mover.opposite();
        mark_legal_moves(&self.board, self.active, &mut self.legal);

        debug!(
            round = self.round,
            color = %mover,
            %position,
            flipped = flipped.len(),
            "move applied"
        );

        self.finish_if_over();
        Step::Moved {
            color: mover,
            position,
            flipped,
        }
    }

    fn pass(&mut self) -> Step {
        let color = self.active;
        self.passes += 1;
        if self.passes > 1 {
            debug!(round = self.round, "both sides passed");
            self.status = MatchStatus::Finished;
            self.finish_if_over();
            return Step::Finished;
        }

        self.round += 1;
        self.active = color.opposite();
        mark_legal_moves(&self.board, self.active, &mut self.legal);
        debug!(round = self.round, color = %color, "forced pass");

        self.finish_if_over();
        Step::Passed { color }
    }

    /// Marks the match finished when both sides passed or every placeable
    /// move has been used, and books the result once.
    fn finish_if_over(&mut self) -> bool {
        if self.status == MatchStatus::NotStarted {
            return false;
        }
        if self.status != MatchStatus::Finished && self.round <= self.max_rounds() {
            return false;
        }

        self.status = MatchStatus::Finished;
        if !self.result_recorded {
            self.record_result();
        }
        true
    }

    /// Ties count as a win for both sides.
    fn record_result(&mut self) {
        self.recalculate_scores();
        let (black, white) = (self.black.score(), self.white.score());

        if black > white {
            self.black.record_win();
            self.white.record_loss();
        } else if white > black {
            self.white.record_win();
            self.black.record_loss();
        } else {
            self.black.record_win();
            self.white.record_win();
        }
        self.result_recorded = true;

        info!(
            black,
            white,
            winner = ?self.winner(),
            transcript = %self.transcript,
            "match finished"
        );
    }

    fn recalculate_scores(&mut self) {
        let (black, white) = self.board.count();
        self.black.set_score(black);
        self.white.set_score(white);
    }

    /// Number of moves that fit on a board that starts with four stones.
    pub fn max_rounds(&self) -> u32 {
        let size = self.board.size() as u32;
        (size * size).saturating_sub(4)
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// The side with more stones once the match is over. `None` for a tie or
    /// while the match is still running.
    pub fn winner(&self) -> Option<Color> {
        if !self.is_finished() {
            return None;
        }
        let (black, white) = (self.black.score(), self.white.score());
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Legal destinations for the active side.
    pub fn legal_moves(&self) -> &LegalMoves {
        &self.legal
    }

    pub fn black(&self) -> &Player {
        &self.black
    }

    pub fn white(&self) -> &Player {
        &self.white
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    pub fn active_color(&self) -> Color {
        self.active
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn engine_side(&self) -> Option<Color> {
        self.engine.as_ref().map(|engine| engine.color)
    }

    pub fn view(&self) -> GameView {
        GameView {
            size: self.board.size(),
            cells: self.board.to_array(),
            legal_moves: self.legal.positions(),
            black: self.black.view(),
            white: self.white.view(),
            active: self.active,
            round: self.round,
            transcript: self.transcript.clone(),
            status: self.status,
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            size: self.board.size(),
            cells: self.board.cells().to_vec(),
            round: self.round,
            passes: self.passes,
            active: self.active,
            transcript: self.transcript.clone(),
            black: self.black,
            white: self.white,
            finished: self.is_finished(),
            result_recorded: self.result_recorded,
        }
    }

    /// Replaces the match state with `snapshot`. Scores and legal marks are
    /// recomputed from the restored grid.
    pub fn restore(&mut self, snapshot: &MatchSnapshot) -> Result<(), SnapshotError> {
        snapshot.validate()?;
        let board = Board::from_cells(snapshot.size, snapshot.cells.clone()).ok_or(
            SnapshotError::CellCount {
                expected: snapshot.size * snapshot.size,
                actual: snapshot.cells.len(),
            },
        )?;

        self.board = board;
        self.black = snapshot.black;
        self.white = snapshot.white;
        self.active = snapshot.active;
        self.round = snapshot.round;
        self.passes = snapshot.passes;
        self.transcript = snapshot.transcript.clone();
        self.result_recorded = snapshot.result_recorded;
        self.status = if snapshot.finished {
            MatchStatus::Finished
        } else {
            MatchStatus::InProgress
        };

        self.recalculate_scores();
        mark_legal_moves(&self.board, self.active, &mut self.legal);
        self.finish_if_over();
        debug!(round = self.round, active = %self.active, "match restored");
        Ok(())
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, active: Color) {
        self.board = board;
        self.legal = LegalMoves::new(self.board.size());
        self.active = active;
        self.passes = 0;
        self.status = MatchStatus::InProgress;
        self.result_recorded = false;
        self.recalculate_scores();
        mark_legal_moves(&self.board, self.active, &mut self.legal);
    }
}

impl Default for Othello {
    fn default() -> Self {
        Self::build(crate::board::DEFAULT_BOARD_SIZE)
    }
}
