//! One-way notifications from the sequencer to whatever presents the
//! session: a console here, a board UI in a richer frontend. The sequencer
//! never reads presentation state back.

use crate::speech;

/// Presentation sink. The narration methods are awaited so that playback
/// pacing includes the announcement itself.
#[allow(async_fn_in_trait)]
pub trait Presenter {
    fn set_status(&mut self, status: &str);
    fn set_game_info(&mut self, info: &str);
    fn show_error(&mut self, message: &str);
    fn set_input_enabled(&mut self, enabled: bool);

    async fn announce_opening(&mut self, opening: &str, line: &str);
    async fn speak_pair(&mut self, moves: &[String]);
    async fn announce_completion(&mut self, next_side: &str);
}

/// Prints everything to stdout; narration is rendered as text.
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn set_status(&mut self, status: &str) {
        println!("{status}");
    }

    fn set_game_info(&mut self, info: &str) {
        println!("{info}");
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        if enabled {
            println!("(enter moves as SAN or UCI, \"quit\" to stop)");
        }
    }

    async fn announce_opening(&mut self, opening: &str, line: &str) {
        println!("{}", speech::opening_announcement(opening, line));
    }

    async fn speak_pair(&mut self, moves: &[String]) {
        println!("  {}", speech::pair_announcement(moves));
    }

    async fn announce_completion(&mut self, next_side: &str) {
        println!("{}", speech::completion_announcement(next_side));
    }
}
