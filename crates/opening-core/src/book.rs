use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Lowercase alphanumeric slug identifying an opening (e.g. "sicilian").
pub type OpeningKey = String;

/// Lowercase alphanumeric slug identifying a line within an opening
/// (e.g. "najdorf").
pub type VariationKey = String;

/// The entire opening book: opening -> (line -> numbered-pair move text).
pub type OpeningBook = HashMap<OpeningKey, HashMap<VariationKey, String>>;

/// Display labels for variation keys.
pub type LineNames = HashMap<VariationKey, String>;

/// An opening book together with its display-name table.
///
/// Built once, read-only afterwards. A reload builds a fresh `Catalog` and
/// swaps it in whole; nothing mutates a catalog in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub book: OpeningBook,
    pub line_names: LineNames,
}

impl Catalog {
    /// True when no opening contributed any variation at all.
    pub fn is_empty(&self) -> bool {
        self.book.values().all(|lines| lines.is_empty())
    }

    /// Move text for one line, if present.
    pub fn line(&self, opening: &str, line: &str) -> Option<&str> {
        self.book.get(opening)?.get(line).map(String::as_str)
    }
}

static MOVE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.\s*").unwrap());

/// Split numbered-pair move text into pair chunks:
/// `"1. e4 e5 2. Nf3"` -> `["e4 e5", "Nf3"]`.
pub fn split_move_pairs(moves: &str) -> Vec<String> {
    MOVE_NUMBER_RE
        .split(moves)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(str::to_string)
        .collect()
}

/// Flatten numbered-pair move text into individual plies in play order,
/// white then black per pair. A pair with no black reply contributes a
/// single ply; stray extra tokens in a pair are ignored.
pub fn flatten_moves(moves: &str) -> Vec<String> {
    split_move_pairs(moves)
        .iter()
        .flat_map(|pair| pair.split_whitespace().take(2).map(str::to_string))
        .collect()
}
