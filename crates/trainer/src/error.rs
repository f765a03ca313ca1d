use std::io;

/// Failures the trainer surfaces to the user. Everything else degrades
/// locally: malformed records are dropped, unreadable sources become empty
/// variation sets, and illegal moves are ordinary rejected outcomes.
#[derive(Debug, thiserror::Error)]
pub enum TrainerError {
    #[error("opening book is empty: no variations could be loaded")]
    EmptyCatalog,

    #[error("unknown opening: {0}")]
    UnknownOpening(String),

    #[error("unknown line: {0}")]
    UnknownLine(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
