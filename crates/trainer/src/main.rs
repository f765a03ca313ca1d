use std::io::{self, BufRead};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use opening_core::catalog::opening_display_name;
use trainer::config::Config;
use trainer::engine::{RulesEngine, ShakmatyEngine};
use trainer::loader;
use trainer::presenter::ConsolePresenter;
use trainer::session::{Mode, Pacing, Session, TestOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("list");

    // --scan picks up every *.pgn in the book directory instead of the
    // fixed default file table.
    let catalog = Arc::new(if args.iter().any(|a| a == "--scan") {
        loader::load_catalog_from_dir(&config.book_dir)?
    } else {
        loader::load_catalog(&config.book_dir)?
    });

    match command {
        "list" => {
            let mut openings: Vec<_> = catalog.book.iter().collect();
            openings.sort_by(|a, b| a.0.cmp(b.0));
            for (opening, lines) in openings {
                println!("{} ({})", opening_display_name(opening), opening);
                let mut keys: Vec<_> = lines.keys().collect();
                keys.sort();
                for key in keys {
                    let label = catalog.line_names.get(key).cloned().unwrap_or_default();
                    println!("  {key:<14} {label}");
                }
            }
        }
        "export" => {
            let json = if args.iter().any(|a| a == "--pretty") {
                serde_json::to_string_pretty(catalog.as_ref())?
            } else {
                serde_json::to_string(catalog.as_ref())?
            };
            println!("{json}");
        }
        "play" | "test" => {
            let (Some(opening), Some(line)) = (args.get(2), args.get(3)) else {
                eprintln!("Usage: trainer {command} <opening> <line>");
                std::process::exit(1);
            };

            let pacing = Pacing {
                move_delay: config.move_delay,
                pair_delay: config.pair_delay,
            };
            let mut session =
                Session::new(ShakmatyEngine::new(), ConsolePresenter, catalog, pacing);
            session.select(opening, line)?;

            if command == "play" {
                // Ctrl-C raises the cooperative cancel flag; the playback
                // loop observes it at its next boundary.
                let handle = session.cancel_handle();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        handle.cancel();
                    }
                });
                session.play().await;
            } else {
                run_quiz(&mut session)?;
            }
        }
        _ => {
            eprintln!("Usage: trainer <list|play|test|export> [opening] [line]");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Read move attempts from stdin and feed them through the session until the
/// line is completed, stdin ends, or the learner quits.
fn run_quiz(session: &mut Session<ShakmatyEngine, ConsolePresenter>) -> anyhow::Result<()> {
    session.start_test();

    for line in io::stdin().lock().lines() {
        let attempt = line?;
        let attempt = attempt.trim();
        if attempt.is_empty() {
            continue;
        }
        if attempt == "quit" {
            session.stop();
            break;
        }

        // The rules engine judges legality first; the sequencer only judges
        // whether the legal move matches the book.
        let Some(mv) = session.engine_mut().submit_move(attempt) else {
            println!("Illegal move: {attempt}");
            continue;
        };
        match session.handle_test_move(&mv) {
            TestOutcome::Complete => break,
            TestOutcome::Rejected { .. } => {
                // The move already landed on the board; take it back.
                session.engine_mut().undo();
            }
            TestOutcome::Correct { .. } | TestOutcome::NotTesting => {}
        }
        if session.mode() == Mode::Idle {
            break;
        }
    }

    Ok(())
}
