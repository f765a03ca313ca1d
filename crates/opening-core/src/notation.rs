//! SAN token equivalence under alternative spellings.
//!
//! The rules engine settles legality and produces a canonical SAN; the
//! learner may spell the same move differently: missing check suffix,
//! missing or extra disambiguation, or bare coordinates. Comparison here is
//! pure string work, no board state involved.

use regex::Regex;
use std::sync::LazyLock;

/// Piece move carrying a disambiguator: piece, file/rank/square, destination, suffix.
static DISAMBIGUATED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([NBRQK])([a-h][1-8]|[a-h]|[1-8])([a-h][1-8])([+#]?)$").unwrap()
});

/// Piece move without a disambiguator.
static PLAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([NBRQK])([a-h][1-8])([+#]?)$").unwrap());

/// Whether two SAN tokens denote the same move.
///
/// Matches on, in order: exact equality; equality ignoring a trailing
/// `+`/`#` on either token; disambiguation folding in both directions
/// ("Ncb4" and "Nb4" agree on piece, destination, and suffix, so whichever
/// side carries the disambiguator, they are the same move).
pub fn moves_equivalent(actual: &str, expected: &str) -> bool {
    if actual == expected {
        return true;
    }
    if strip_suffix(actual) == expected || actual == strip_suffix(expected) {
        return true;
    }
    folds_to(actual, expected) || folds_to(expected, actual)
}

/// Equivalence with the validated move's coordinates available: the expected
/// token may itself be written as bare from/to squares ("e2e4").
pub fn moves_equivalent_with_squares(
    actual: &str,
    from: Option<&str>,
    to: &str,
    expected: &str,
) -> bool {
    if moves_equivalent(actual, expected) {
        return true;
    }
    match from {
        Some(from) => {
            let coords = format!("{from}{to}");
            coords == expected || coords == expected.to_lowercase()
        }
        None => false,
    }
}

fn strip_suffix(san: &str) -> &str {
    san.trim_end_matches(['+', '#'])
}

/// `bare` matches `disambiguated` when only the disambiguator differs. The
/// engine already resolved which piece moves; the un-disambiguated spelling
/// is accepted as long as piece, destination, and suffix agree.
fn folds_to(bare: &str, disambiguated: &str) -> bool {
    let (Some(b), Some(d)) = (
        PLAIN_RE.captures(bare),
        DISAMBIGUATED_RE.captures(disambiguated),
    ) else {
        return false;
    };
    b[1] == d[1] && b[2] == d[3] && b[3] == d[4]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(moves_equivalent("e4", "e4"));
        assert!(moves_equivalent("O-O", "O-O"));
        assert!(!moves_equivalent("e4", "d4"));
    }

    #[test]
    fn test_suffix_insensitive() {
        assert!(moves_equivalent("Qd8+", "Qd8"));
        assert!(moves_equivalent("Qd8", "Qd8+"));
        assert!(moves_equivalent("Qxf7#", "Qxf7"));
        assert!(!moves_equivalent("Qd8", "Qd7+"));
    }

    #[test]
    fn test_disambiguation_folding_is_symmetric() {
        assert!(moves_equivalent("Ncb4", "Nb4"));
        assert!(moves_equivalent("Nb4", "Ncb4"));
        assert!(moves_equivalent("R1e2", "Re2"));
        assert!(moves_equivalent("Qh4e1", "Qe1"));
    }

    #[test]
    fn test_folding_requires_matching_suffix_and_destination() {
        assert!(!moves_equivalent("Nb4+", "Ncb4"));
        assert!(!moves_equivalent("Nb4", "Ncb5"));
        assert!(!moves_equivalent("Bb4", "Ncb4"));
    }

    #[test]
    fn test_coordinate_equivalence() {
        assert!(moves_equivalent_with_squares("e4", Some("e2"), "e4", "e2e4"));
        assert!(moves_equivalent_with_squares("e4", Some("e2"), "e4", "E2E4"));
        assert!(!moves_equivalent_with_squares("e4", Some("e2"), "e4", "d2d4"));
        // No source square supplied: coordinates cannot match.
        assert!(!moves_equivalent_with_squares("e4", None, "e4", "e2e4"));
    }

    #[test]
    fn test_inputs_never_mutated_or_panicking() {
        // Arbitrary junk just compares unequal.
        assert!(!moves_equivalent("", "e4"));
        assert!(!moves_equivalent("++", "##"));
        assert!(!moves_equivalent("Z9z9", "e4"));
    }
}
