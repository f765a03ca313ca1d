//! Session sequencing: drives guided playback and quiz mode for one
//! selected opening line over the rules engine.
//!
//! The sequencer is single-threaded and cooperative. Playback suspends only
//! at its two pacing delays and at the awaited narration points;
//! cancellation is a shared flag polled at those boundaries and before each
//! move submission, never preemptively.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use opening_core::book::{flatten_moves, split_move_pairs};
use opening_core::catalog::opening_display_name;
use opening_core::notation;
use opening_core::Catalog;

use crate::engine::{RulesEngine, ValidatedMove};
use crate::error::TrainerError;
use crate::presenter::Presenter;

/// Pacing for guided playback.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// Pause after the white move of a pair.
    pub move_delay: Duration,
    /// Pause between move pairs.
    pub pair_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            move_delay: Duration::from_millis(400),
            pair_delay: Duration::from_millis(800),
        }
    }
}

/// The sequencer's mode. Playing and Testing are mutually exclusive and
/// both always return to Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Playing,
    Testing,
}

/// Outcome of judging one user move during a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    /// Not in test mode; the move is none of the sequencer's business.
    NotTesting,
    /// Matched the expected ply; `remaining` plies still to go.
    Correct { remaining: usize },
    /// Matched the final ply; the session is back to Idle.
    Complete,
    /// Did not match. The caller must undo the move on the game state; the
    /// sequencer only signals the rejection.
    Rejected { expected: String },
}

/// Cooperative cancellation handle. Raising the flag takes effect at the
/// sequencer's next poll point; it never interrupts an engine call.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone)]
struct Selection {
    opening: String,
    line: String,
}

/// The finite-state controller over one engine, one presenter, and one
/// shared read-only catalog. Exactly one session exists per trainer.
pub struct Session<E, P> {
    engine: E,
    presenter: P,
    catalog: Arc<Catalog>,
    pacing: Pacing,
    mode: Mode,
    selected: Option<Selection>,
    expected: Vec<String>,
    cursor: usize,
    cancel: CancelHandle,
}

impl<E: RulesEngine, P: Presenter> Session<E, P> {
    pub fn new(engine: E, presenter: P, catalog: Arc<Catalog>, pacing: Pacing) -> Self {
        Self {
            engine,
            presenter,
            catalog,
            pacing,
            mode: Mode::Idle,
            selected: None,
            expected: Vec::new(),
            cursor: 0,
            cancel: CancelHandle::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn expected_moves(&self) -> &[String] {
        &self.expected
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Pick the line to train. Valid in any mode; it does not interrupt an
    /// active one (cancel first to switch mid-playback).
    pub fn select(&mut self, opening: &str, line: &str) -> Result<(), TrainerError> {
        if !self.catalog.book.contains_key(opening) {
            return Err(TrainerError::UnknownOpening(opening.to_string()));
        }
        if self.catalog.line(opening, line).is_none() {
            return Err(TrainerError::UnknownLine(line.to_string()));
        }

        self.selected = Some(Selection {
            opening: opening.to_string(),
            line: line.to_string(),
        });
        let info = format!(
            "Selected: {} - {}",
            opening_display_name(opening),
            self.line_label(line)
        );
        self.presenter.set_game_info(&info);
        Ok(())
    }

    /// Swap in a freshly built catalog (whole-reference replacement, never
    /// in-place mutation). Aborts any active mode and clears the selection.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) {
        self.stop();
        self.catalog = catalog;
        self.selected = None;
    }

    /// Guided playback of the selected line. A no-op unless Idle with a
    /// selection; always back to Idle on return.
    pub async fn play(&mut self) {
        let Some(selection) = self.selected.clone() else {
            return;
        };
        if self.mode != Mode::Idle {
            return;
        }

        self.mode = Mode::Playing;
        self.cancel.clear();
        self.engine.reset();
        self.presenter.set_status("Playing opening...");

        let opening_name = opening_display_name(&selection.opening);
        let line_name = self.line_label(&selection.line);
        self.presenter
            .announce_opening(&opening_name, &line_name)
            .await;

        let moves = self
            .catalog
            .line(&selection.opening, &selection.line)
            .unwrap_or_default()
            .to_string();
        let completed = self.play_pairs(&moves).await;

        self.mode = Mode::Idle;
        if completed {
            let side = self.engine.side_to_move();
            self.presenter
                .set_status(&format!("Opening complete - {} to move", side.label()));
            self.presenter.announce_completion(side.label()).await;
        } else {
            tracing::debug!("Playback cancelled");
        }
    }

    /// Submit the line pair by pair. Returns false when cancellation cut the
    /// run short; the flag is checked before every submission and around
    /// every wait.
    async fn play_pairs(&mut self, moves: &str) -> bool {
        let pairs = split_move_pairs(moves);

        for (index, pair) in pairs.iter().enumerate() {
            if self.cancel.is_cancelled() {
                return false;
            }

            let mut spoken = Vec::new();
            let mut plies = pair.split_whitespace();

            if let Some(white) = plies.next() {
                self.submit_book_move(white, &mut spoken);
                tokio::time::sleep(self.pacing.move_delay).await;
                if self.cancel.is_cancelled() {
                    return false;
                }
            }

            if let Some(black) = plies.next() {
                self.submit_book_move(black, &mut spoken);
                if self.cancel.is_cancelled() {
                    return false;
                }
            }

            if !spoken.is_empty() {
                self.presenter.speak_pair(&spoken).await;
            }

            if index + 1 < pairs.len() {
                tokio::time::sleep(self.pacing.pair_delay).await;
                if self.cancel.is_cancelled() {
                    return false;
                }
            }
        }

        true
    }

    fn submit_book_move(&mut self, ply: &str, spoken: &mut Vec<String>) {
        match self.engine.submit_move(ply) {
            Some(mv) => spoken.push(mv.san),
            // Book text that the engine refuses is skipped, not fatal.
            None => {
                tracing::warn!(ply = %ply, "Rules engine rejected a book move");
                self.presenter
                    .show_error(&format!("Skipping invalid book move: {ply}"));
            }
        }
    }

    /// Enter quiz mode on the selected line. A no-op unless Idle with a
    /// selection.
    pub fn start_test(&mut self) {
        let Some(selection) = self.selected.clone() else {
            return;
        };
        if self.mode != Mode::Idle {
            return;
        }

        self.cancel.clear();
        self.cursor = 0;
        self.engine.reset();

        let moves = self
            .catalog
            .line(&selection.opening, &selection.line)
            .unwrap_or_default();
        self.expected = flatten_moves(moves);
        if self.expected.is_empty() {
            return;
        }

        self.mode = Mode::Testing;
        let status = format!(
            "Test mode: play {} (move 1 of {})",
            self.expected[0],
            self.expected.len()
        );
        self.presenter.set_status(&status);
        let info = format!(
            "Testing: {} - {}",
            opening_display_name(&selection.opening),
            self.line_label(&selection.line)
        );
        self.presenter.set_game_info(&info);
        self.presenter.set_input_enabled(true);
    }

    /// Judge one engine-validated user move against the expected sequence.
    pub fn handle_test_move(&mut self, mv: &ValidatedMove) -> TestOutcome {
        if self.mode != Mode::Testing || self.cursor >= self.expected.len() {
            return TestOutcome::NotTesting;
        }

        let expected = self.expected[self.cursor].clone();
        let matched = notation::moves_equivalent_with_squares(
            &mv.san,
            mv.from.as_deref(),
            &mv.to,
            &expected,
        );

        if !matched {
            let status = format!("Wrong move. Expected {expected}, got {}. Try again.", mv.san);
            self.presenter.set_status(&status);
            return TestOutcome::Rejected { expected };
        }

        self.cursor += 1;
        if self.cursor == self.expected.len() {
            self.mode = Mode::Idle;
            self.presenter.set_input_enabled(false);
            self.presenter
                .set_status("Perfect! You completed the opening correctly.");
            return TestOutcome::Complete;
        }

        let remaining = self.expected.len() - self.cursor;
        let status = format!(
            "Correct! Next: {} ({} moves to go)",
            self.expected[self.cursor], remaining
        );
        self.presenter.set_status(&status);
        TestOutcome::Correct { remaining }
    }

    /// Abort whatever is active and return to Idle: raises the cancel flag,
    /// resets the board, and clears mode-specific state. Valid from any
    /// state at any time.
    pub fn stop(&mut self) {
        self.cancel.cancel();
        self.engine.reset();
        self.mode = Mode::Idle;
        self.expected.clear();
        self.cursor = 0;
        self.presenter.set_input_enabled(false);
        self.presenter.set_status("Session stopped");
    }

    fn line_label(&self, line: &str) -> String {
        self.catalog
            .line_names
            .get(line)
            .cloned()
            .unwrap_or_else(|| line.to_string())
    }
}
