//! Catalog construction: aggregates parsed records across sources and
//! derives the display-name table.

use crate::book::{Catalog, LineNames, OpeningBook};
use crate::record;

/// Curated display labels for well-known variation keys. Anything not
/// listed gets the capitalized slug as a fallback.
const LINE_LABELS: &[(&str, &str)] = &[
    ("classical", "Classical Variation"),
    ("aggressive", "Bird's Attack"),
    ("modern", "Modern Defense"),
    ("knights", "Two Knights Defense"),
    ("hungarian", "Hungarian Defense"),
    ("closed", "Closed Defense"),
    ("berlin", "Berlin Defense"),
    ("morphy", "Morphy Defense"),
    ("declined", "Declined"),
    ("accepted", "Accepted"),
    ("slav", "Slav Defense"),
    ("najdorf", "Najdorf Variation"),
    ("dragon", "Dragon Variation"),
    ("accelerated", "Accelerated Dragon"),
    ("main", "Main Line"),
];

/// Curated display names for opening keys.
const OPENING_LABELS: &[(&str, &str)] = &[
    ("italian", "Italian Game"),
    ("ruylopez", "Ruy Lopez"),
    ("queens", "Queen's Gambit"),
    ("sicilian", "Sicilian Defense"),
];

/// Build the catalog from (opening key, raw record text) sources. Sources
/// are parsed independently; one opening's bad text cannot affect another.
/// Callers substitute empty text for sources that failed to load.
pub fn build_catalog(sources: &[(String, String)]) -> Catalog {
    let mut book = OpeningBook::new();
    for (key, text) in sources {
        let variations = record::parse_records(text);
        tracing::debug!(opening = %key, lines = variations.len(), "Parsed opening source");
        book.insert(key.clone(), variations);
    }

    let line_names = derive_line_names(&book);
    Catalog { book, line_names }
}

/// Derive display names for every variation key in the book. The first
/// occurrence of a key wins; later openings never overwrite an entry.
pub fn derive_line_names(book: &OpeningBook) -> LineNames {
    let mut names = LineNames::new();
    for lines in book.values() {
        for key in lines.keys() {
            names
                .entry(key.clone())
                .or_insert_with(|| line_display_name(key));
        }
    }
    names
}

/// Human-readable label for a variation key.
pub fn line_display_name(key: &str) -> String {
    lookup(LINE_LABELS, key).unwrap_or_else(|| title_case(key))
}

/// Human-readable label for an opening key.
pub fn opening_display_name(key: &str) -> String {
    lookup(OPENING_LABELS, key).unwrap_or_else(|| title_case(key))
}

fn lookup(table: &[(&str, &str)], key: &str) -> Option<String> {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| (*label).to_string())
}

/// Fallback label: the slug with its first letter capitalized.
fn title_case(slug: &str) -> String {
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
