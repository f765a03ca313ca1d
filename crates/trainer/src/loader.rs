//! Catalog loading: reads PGN sources from disk and hands them to the pure
//! builder. An unreadable file degrades to an empty variation set for its
//! opening key; only a catalog with nothing in it at all is an error.

use std::fs;
use std::path::Path;

use opening_core::catalog::build_catalog;
use opening_core::Catalog;

use crate::error::TrainerError;

/// Default source files, keyed by opening slug.
pub const DEFAULT_SOURCES: &[(&str, &str)] = &[
    ("italian", "italian-game.pgn"),
    ("ruylopez", "ruy-lopez.pgn"),
    ("queens", "queens-gambit.pgn"),
    ("sicilian", "sicilian-defense.pgn"),
];

/// Load the standard book from `book_dir` using the default file table.
pub fn load_catalog(book_dir: &str) -> Result<Catalog, TrainerError> {
    let sources: Vec<(String, String)> = DEFAULT_SOURCES
        .iter()
        .map(|(key, filename)| {
            let path = Path::new(book_dir).join(filename);
            ((*key).to_string(), read_source(&path))
        })
        .collect();

    finish(build_catalog(&sources))
}

/// Build a catalog from every `*.pgn` under `book_dir`, using each file stem
/// as the opening key.
pub fn load_catalog_from_dir(book_dir: &str) -> Result<Catalog, TrainerError> {
    let pattern = format!("{book_dir}/*.pgn");
    let mut sources = Vec::new();

    if let Ok(paths) = glob::glob(&pattern) {
        for path in paths.filter_map(|p| p.ok()) {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            sources.push((stem.to_string(), read_source(&path)));
        }
    }

    finish(build_catalog(&sources))
}

fn read_source(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read opening source");
            String::new()
        }
    }
}

fn finish(catalog: Catalog) -> Result<Catalog, TrainerError> {
    if catalog.is_empty() {
        return Err(TrainerError::EmptyCatalog);
    }
    let lines: usize = catalog.book.values().map(|v| v.len()).sum();
    tracing::info!(openings = catalog.book.len(), lines, "Loaded opening book");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_yields_empty_catalog_error() {
        let err = load_catalog("/nonexistent/book/dir").unwrap_err();
        assert!(matches!(err, TrainerError::EmptyCatalog));
    }

    #[test]
    fn test_directory_scan_keys_by_file_stem() {
        let dir = std::env::temp_dir().join("opening-trainer-loader-test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("vienna.pgn"),
            "[Variation \"Main\"]\n1. e4 e5 2. Nc3\n",
        )
        .unwrap();

        let catalog = load_catalog_from_dir(dir.to_str().unwrap()).unwrap();
        assert_eq!(catalog.line("vienna", "main"), Some("1. e4 e5 2. Nc3"));
        assert_eq!(catalog.line_names["main"], "Main Line");
    }
}
