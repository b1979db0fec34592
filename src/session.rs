//! Turn loop that connects an [`Othello`] match to a human input source and
//! a presentation sink.

use tracing::{debug, error, info};
use web_time::Instant;

use crate::game::Othello;
use crate::source::MoveSource;
use crate::types::{Color, GameView, Step};

/// Read-only sink for renderers. Called with a fresh view after every step.
pub trait Presenter {
    fn present(&mut self, view: &GameView);
}

impl<F: FnMut(&GameView)> Presenter for F {
    fn present(&mut self, view: &GameView) {
        self(view)
    }
}

/// How a driven match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The match ran to its end. `winner` is `None` for a tie.
    Completed {
        winner: Option<Color>,
        black: u32,
        white: u32,
    },
    /// A move source stopped producing usable moves before the end.
    Abandoned,
}

/// Drives a started match to completion.
///
/// The engine-driven side (if any) moves on its own; every other turn waits
/// on `human`, and rejected coordinates are simply asked for again. A side
/// with no legal move passes without consulting anyone. The match is
/// abandoned when either source hangs up or the engine proposes a move the
/// board refuses.
pub fn play_match(
    game: &mut Othello,
    human: &mut dyn MoveSource,
    presenter: &mut dyn Presenter,
) -> MatchOutcome {
    let started = Instant::now();
    presenter.present(&game.view());

    while !game.is_finished() {
        let legal = game.legal_moves();
        let needs_input = game.engine_side() != Some(game.active_color()) && !legal.is_empty();

        let step = if needs_input {
            match human.choose_move(legal) {
                Some(pos) => game.advance(pos.x, pos.y),
                None => {
                    info!(round = game.round(), "input closed, abandoning match");
                    return MatchOutcome::Abandoned;
                }
            }
        } else {
            game.advance(0, 0)
        };

        match step {
            Step::SourceClosed => {
                info!(round = game.round(), "engine source closed, abandoning match");
                return MatchOutcome::Abandoned;
            }
            // An engine move that is refused once will be refused again.
            Step::Rejected if !needs_input => {
                error!(round = game.round(), "engine move rejected, abandoning match");
                return MatchOutcome::Abandoned;
            }
            Step::Rejected => {
                debug!(round = game.round(), "asking again");
                continue;
            }
            _ => {}
        }
        presenter.present(&game.view());
    }

    let outcome = MatchOutcome::Completed {
        winner: game.winner(),
        black: game.black().score(),
        white: game.white().score(),
    };
    info!(elapsed = ?started.elapsed(), ?outcome, "match complete");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ChannelMoveSource, FirstLegalMoveSource, RandomMoveSource};
    use crate::types::{MatchStatus, Position};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn engine_against_scripted_human_runs_to_completion() {
        let mut game =
            Othello::with_engine(6, Color::White, Box::new(RandomMoveSource::seeded(11))).unwrap();
        game.new_game();
        let mut frames = Vec::new();

        let outcome = play_match(&mut game, &mut FirstLegalMoveSource, &mut |view: &GameView| {
            frames.push(view.round)
        });

        let MatchOutcome::Completed { black, white, winner } = outcome else {
            panic!("match should complete");
        };
        assert!(game.is_finished());
        assert_eq!(winner, game.winner());
        assert_eq!((black, white), game.board().count());
        assert_eq!(frames.first(), Some(&1));
        assert!(frames.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn both_sides_from_one_human_source() {
        let mut game = Othello::new(4).unwrap();
        game.new_game();

        let outcome = play_match(&mut game, &mut FirstLegalMoveSource, &mut |_: &GameView| {});

        assert!(matches!(outcome, MatchOutcome::Completed { .. }));
        assert_eq!(game.status(), MatchStatus::Finished);
        assert!(!game.transcript().is_empty());
    }

    #[test]
    fn channel_input_is_reprompted_after_illegal_click() {
        let mut game = Othello::new(8).unwrap();
        game.new_game();
        let (sender, mut source) = ChannelMoveSource::pair();

        let input = thread::spawn(move || {
            // Corner is illegal on the opening board, then a legal reply.
            sender.send(Position::new(0, 0));
            sender.send(Position::new(2, 3));
        });

        let mut last_round = 0;
        let outcome = play_match(&mut game, &mut source, &mut |view: &GameView| {
            last_round = view.round
        });
        input.join().unwrap();

        assert_eq!(outcome, MatchOutcome::Abandoned);
        assert_eq!(game.transcript(), "C4");
        assert_eq!(last_round, 2);
        assert!(!game.is_finished());
    }

    #[test]
    fn hung_up_engine_source_abandons_match() {
        let (sender, engine) = ChannelMoveSource::pair();
        drop(sender);
        let mut game = Othello::with_engine(8, Color::Black, Box::new(engine)).unwrap();
        game.new_game();
        let (done_tx, done_rx) = mpsc::channel();

        thread::spawn(move || {
            let outcome = play_match(&mut game, &mut FirstLegalMoveSource, &mut |_: &GameView| {});
            let _ = done_tx.send((outcome, game.round(), game.transcript().to_string()));
        });

        let (outcome, round, transcript) = done_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("play_match should return");
        assert_eq!(outcome, MatchOutcome::Abandoned);
        assert_eq!(round, 1);
        assert!(transcript.is_empty());
    }
}
