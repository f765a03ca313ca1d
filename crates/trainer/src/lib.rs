//! The opening trainer: a session sequencer that plays back and quizzes
//! named opening lines over a rules-engine oracle, plus the I/O shell that
//! loads the opening book and presents the session.

pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod presenter;
pub mod session;
pub mod speech;
