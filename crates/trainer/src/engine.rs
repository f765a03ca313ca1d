//! The rules-engine boundary. Legality, check detection, and canonical SAN
//! all come from the engine; the trainer never reimplements them. The trait
//! exists so tests can drive the sequencer with a scripted double.

use shakmaty::{san::SanPlus, uci::UciMove, Chess, Color, Move, Position};

/// A move the rules engine has validated and applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMove {
    /// Canonical SAN including any check/mate suffix.
    pub san: String,
    /// Source square; absent for moves without one (e.g. drops in variants).
    pub from: Option<String>,
    /// Destination square.
    pub to: String,
}

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}

/// What the sequencer needs from a rules engine.
pub trait RulesEngine {
    /// Validate and apply a move given as SAN or UCI. `None` means the move
    /// is illegal in the current position; that is a normal outcome, not an
    /// error.
    fn submit_move(&mut self, attempt: &str) -> Option<ValidatedMove>;

    fn side_to_move(&self) -> Side;

    /// Back to the starting position.
    fn reset(&mut self);

    /// Take back the last applied move. False when there is nothing to undo.
    fn undo(&mut self) -> bool;
}

/// Rules engine backed by `shakmaty`, with an undo stack of positions.
#[derive(Debug, Clone, Default)]
pub struct ShakmatyEngine {
    pos: Chess,
    history: Vec<Chess>,
}

impl ShakmatyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve(&self, attempt: &str) -> Option<Move> {
        if let Ok(san) = attempt.parse::<SanPlus>() {
            if let Ok(mv) = san.san.to_move(&self.pos) {
                return Some(mv);
            }
        }
        let uci: UciMove = attempt.parse().ok()?;
        uci.to_move(&self.pos).ok()
    }
}

impl RulesEngine for ShakmatyEngine {
    fn submit_move(&mut self, attempt: &str) -> Option<ValidatedMove> {
        let mv = self.resolve(attempt)?;
        let san = shakmaty::san::San::from_move(&self.pos, mv).to_string();

        self.history.push(self.pos.clone());
        self.pos.play_unchecked(mv);

        let san = if self.pos.is_checkmate() {
            format!("{san}#")
        } else if self.pos.is_check() {
            format!("{san}+")
        } else {
            san
        };

        Some(ValidatedMove {
            san,
            from: mv.from().map(|sq| sq.to_string()),
            to: mv.to().to_string(),
        })
    }

    fn side_to_move(&self) -> Side {
        match self.pos.turn() {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }

    fn reset(&mut self) {
        self.pos = Chess::default();
        self.history.clear();
    }

    fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(prev) => {
                self.pos = prev;
                true
            }
            None => false,
        }
    }
}
