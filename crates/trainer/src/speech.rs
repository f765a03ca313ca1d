//! Spoken-form rendering of SAN tokens and the fixed session announcements.
//! Pure string formatting; actual voice output is a presentation concern.

pub fn opening_announcement(opening: &str, line: &str) -> String {
    format!("Playing {opening}, {line}")
}

pub fn pair_announcement(moves: &[String]) -> String {
    moves
        .iter()
        .map(|m| format_move(m))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn completion_announcement(next_side: &str) -> String {
    format!("Opening complete. {next_side} to move.")
}

/// Render one SAN token as spoken English, e.g. "Nbd7+" -> "Knight b d7 check".
/// Pawn moves stay as plain squares; a disambiguator becomes its own word.
pub fn format_move(san: &str) -> String {
    let mut spoken = san.replace("O-O-O", "castles queenside");
    spoken = spoken.replace("O-O", "castles kingside");
    spoken = spoken.replace('+', " check");
    spoken = spoken.replace('#', " checkmate");
    spoken = spoken.replace('x', " takes ");
    spoken = spoken.replace('=', " promotes to ");

    let mut orig = san.chars();
    let piece = match orig.next() {
        Some('N') => Some("Knight"),
        Some('B') => Some("Bishop"),
        Some('R') => Some("Rook"),
        Some('Q') => Some("Queen"),
        Some('K') => Some("King"),
        _ => None,
    };

    if let Some(name) = piece {
        // The piece letter survives all the replacements above, so the rest
        // of the spoken string starts right after it.
        let rest = &spoken[1..];
        let disambiguated = matches!(orig.next(), Some('a'..='h' | '1'..='8'));
        spoken = if disambiguated {
            let mut rest_chars = rest.chars();
            let d = rest_chars.next().unwrap_or(' ');
            format!("{name} {d} {}", rest_chars.as_str())
        } else {
            format!("{name} {rest}")
        };
    }

    spoken.split_whitespace().collect::<Vec<_>>().join(" ")
}
