//! Opening record parsing: converts raw PGN-style text into a mapping of
//! variation slug -> cleaned numbered-pair move text.
//!
//! Regex-based and deliberately tolerant. Source files are allowed to carry
//! incomplete or malformed records; those are dropped, never raised. The
//! worst case for arbitrary input is an empty mapping.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#).unwrap());
static BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[Event").unwrap());

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^}]*\}").unwrap());
static NESTED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static NAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\d+").unwrap());
static MARK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[!?]+").unwrap());
static RESULT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"1/2-1/2|1-0|0-1|\*").unwrap());
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static NON_SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").unwrap());
static GENERIC_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"variation|defense|attack|gambit|opening").unwrap());

/// Ordered synonym overrides: the first needle found in a derived slug
/// collapses it to the fixed key. Incomplete by construction; names that
/// match nothing here fall through to the generic slug.
const SLUG_OVERRIDES: &[(&[&str], &str)] = &[
    (&["najdorf"], "najdorf"),
    (&["dragon"], "dragon"),
    (&["accelerated"], "accelerated"),
    (&["classical"], "classical"),
    (&["modern"], "modern"),
    (&["aggressive", "bird"], "aggressive"),
    (&["knights", "twoknights"], "knights"),
    (&["hungarian"], "hungarian"),
    (&["closed"], "closed"),
    (&["berlin"], "berlin"),
    (&["morphy"], "morphy"),
    (&["declined"], "declined"),
    (&["accepted"], "accepted"),
    (&["slav"], "slav"),
];

/// Parse one or more concatenated game records into variation-key -> move
/// text. Records that resolve to the same slug overwrite earlier ones.
pub fn parse_records(text: &str) -> HashMap<String, String> {
    let mut variations = HashMap::new();

    for game in split_games(text) {
        let Some((name, moves)) = parse_game(game) else {
            tracing::debug!("Dropping record without a resolvable name or moves");
            continue;
        };
        let key = derive_slug(&name);
        tracing::debug!(key = %key, name = %name, "Parsed opening record");
        variations.insert(key, moves);
    }

    variations
}

/// Split raw text at each `[Event` tag. Text before the first tag counts as
/// a record of its own, so files without an Event header still parse.
fn split_games(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = BOUNDARY_RE.find_iter(text).map(|m| m.start()).collect();

    let mut games = Vec::new();
    let mut prev = 0;
    for &start in &starts {
        if start > prev {
            games.push(&text[prev..start]);
        }
        prev = start;
    }
    games.push(&text[prev..]);

    games.into_iter().filter(|g| !g.trim().is_empty()).collect()
}

/// Extract the resolved variation name and cleaned move text of one record.
/// Returns None when either is missing; such records are dropped.
fn parse_game(game: &str) -> Option<(String, String)> {
    let mut variation_tag: Option<String> = None;
    let mut opening_tag: Option<String> = None;
    let mut event_tag: Option<String> = None;
    let mut movetext = String::new();

    for line in game.trim().lines() {
        if line.starts_with('[') {
            let Some(caps) = TAG_RE.captures(line) else { continue };
            let value = caps[2].to_string();
            if value.is_empty() {
                continue;
            }
            match &caps[1] {
                // A later Variation tag overrides an earlier one; Opening
                // and Event stick with their first occurrence.
                "Variation" => variation_tag = Some(value),
                "Opening" => {
                    opening_tag.get_or_insert(value);
                }
                "Event" => {
                    event_tag.get_or_insert(value);
                }
                _ => {}
            }
        } else if !line.trim().is_empty() && !line.starts_with(';') {
            movetext.push_str(line.trim());
            movetext.push(' ');
        }
    }

    let name = variation_tag
        .or(opening_tag)
        .or_else(|| event_tag.as_deref().and_then(event_suffix))
        .unwrap_or_default();

    let moves = clean_movetext(&movetext);
    if name.is_empty() || moves.is_empty() {
        return None;
    }
    Some((name, moves))
}

/// Derive a variation name from an Event header: the suffix after the last
/// `" - "` separator ("Sicilian Defense - Dragon" -> "Dragon").
fn event_suffix(event: &str) -> Option<String> {
    let idx = event.rfind(" - ")?;
    if idx == 0 {
        return None;
    }
    Some(event[idx + 3..].to_string())
}

/// Strip comments, parenthesized sub-variations, NAGs, annotation marks,
/// and result tokens; collapse whitespace.
fn clean_movetext(raw: &str) -> String {
    let s = COMMENT_RE.replace_all(raw, "");
    let s = NESTED_RE.replace_all(&s, "");
    let s = NAG_RE.replace_all(&s, "");
    let s = MARK_RE.replace_all(&s, "");
    let s = RESULT_RE.replace_all(&s, "");
    WS_RE.replace_all(&s, " ").trim().to_string()
}

/// Derive the slug key for a resolved variation name: lowercase, strip
/// non-alphanumerics, drop generic opening words, remove whitespace, then
/// collapse known synonyms. Too-short results fall back to "main".
pub(crate) fn derive_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = NON_SLUG_RE.replace_all(&lowered, "");
    let without_generics = GENERIC_WORD_RE.replace_all(&stripped, "");
    let slug: String = without_generics.split_whitespace().collect();

    for (needles, key) in SLUG_OVERRIDES {
        if needles.iter().any(|needle| slug.contains(needle)) {
            return (*key).to_string();
        }
    }

    if slug.len() < 2 {
        return "main".to_string();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_record_scenario() {
        let text = r#"[Variation "Najdorf Variation"]

1. e4 c5 2. Nf3 d6

[Event "Sicilian Defense - Dragon"]

1. e4 c5 2. Nf3 d6 3. d4 cxd4
"#;
        let parsed = parse_records(text);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["najdorf"], "1. e4 c5 2. Nf3 d6");
        assert_eq!(parsed["dragon"], "1. e4 c5 2. Nf3 d6 3. d4 cxd4");
    }

    #[test]
    fn test_name_precedence() {
        // Variation beats Opening beats Event, regardless of tag order.
        let text = r#"[Event "Sicilian Defense - Dragon"]
[Opening "Sicilian"]
[Variation "Najdorf Variation"]

1. e4 c5
"#;
        let parsed = parse_records(text);
        assert_eq!(parsed.len(), 1);
        assert!(parsed.contains_key("najdorf"));

        let text = r#"[Event "Italian Game - Giuoco Piano"]
[Opening "Classical Variation"]

1. e4 e5
"#;
        let parsed = parse_records(text);
        assert!(parsed.contains_key("classical"));
    }

    #[test]
    fn test_movetext_cleanup() {
        let text = r#"[Variation "Berlin Defense"]

1. e4! e5?? $14 {a comment} 2. Nf3 (2. f4 d5) Nc6 1-0
"#;
        let parsed = parse_records(text);
        assert_eq!(parsed["berlin"], "1. e4 e5 2. Nf3 Nc6");
    }

    #[test]
    fn test_draw_result_stripped() {
        let text = "[Variation \"Slav Defense\"]\n1. d4 d5 2. c4 c6 1/2-1/2\n";
        let parsed = parse_records(text);
        assert_eq!(parsed["slav"], "1. d4 d5 2. c4 c6");
    }

    #[test]
    fn test_semicolon_comment_lines_skipped() {
        let text = "[Variation \"Morphy Defense\"]\n; annotator note\n1. e4 e5\n";
        let parsed = parse_records(text);
        assert_eq!(parsed["morphy"], "1. e4 e5");
    }

    #[test]
    fn test_incomplete_records_dropped() {
        // No name at all.
        assert!(parse_records("1. e4 e5 2. Nf3").is_empty());
        // Name but no moves.
        assert!(parse_records("[Variation \"Najdorf Variation\"]\n").is_empty());
        // Event with no " - " separator resolves no name.
        assert!(parse_records("[Event \"Casual Game\"]\n1. e4 e5\n").is_empty());
    }

    #[test]
    fn test_arbitrary_input_never_panics() {
        for text in ["", "   \n\n", "{{{ unclosed", "((( [[[ \"", "[Event", "1/2-"] {
            let _ = parse_records(text);
        }
    }

    #[test]
    fn test_slug_collision_last_write_wins() {
        let text = r#"[Variation "Najdorf Variation"]

1. e4 c5

[Event "Training"]
[Variation "Najdorf Attack"]

1. e4 c5 2. Nf3 d6
"#;
        let parsed = parse_records(text);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["najdorf"], "1. e4 c5 2. Nf3 d6");
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let text = "[Variation \"Dragon Variation\"]\n1. e4 c5 2. Nf3 d6 3. d4 cxd4\n";
        assert_eq!(parse_records(text), parse_records(text));
    }

    #[test]
    fn test_derive_slug() {
        assert_eq!(derive_slug("Najdorf Variation"), "najdorf");
        assert_eq!(derive_slug("Bird's Attack"), "aggressive");
        assert_eq!(derive_slug("Two Knights Defense"), "knights");
        assert_eq!(derive_slug("Queen's Gambit Declined"), "declined");
        assert_eq!(derive_slug("Berlin Defense"), "berlin");
        // Unknown names keep their generic slug.
        assert_eq!(derive_slug("Giuoco Piano"), "giuocopiano");
        // Degenerate names fall back to "main".
        assert_eq!(derive_slug("X"), "main");
        assert_eq!(derive_slug("Defense"), "main");
    }
}
