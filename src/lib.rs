//! Othello (Reversi) rules engine.
//!
//! [`Board`] holds the stones, [`logic`] implements the capture rules,
//! and [`Othello`] runs matches: turn order, forced passes, termination and
//! win/loss bookkeeping across matches. Moves for an engine-driven side come
//! from a [`MoveSource`]; everything a frontend needs to draw is in
//! [`GameView`].

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod logic;
pub mod player;
pub mod session;
pub mod snapshot;
pub mod source;
pub mod types;
pub mod wasm;

pub use board::{Board, Occupancy};
pub use config::{EngineKind, OthelloConfig};
pub use error::{ConfigError, SnapshotError};
pub use game::Othello;
pub use logic::LegalMoves;
pub use player::Player;
pub use session::{MatchOutcome, Presenter, play_match};
pub use snapshot::MatchSnapshot;
pub use source::{ChannelMoveSource, FirstLegalMoveSource, MoveSender, MoveSource, RandomMoveSource};
pub use types::{Color, GameView, MatchStatus, PlayerView, Position, Step};
pub use wasm::{WasmOthello, wasm_ready};
