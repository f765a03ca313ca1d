use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub book_dir: String,
    pub move_delay: Duration,
    pub pair_delay: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            book_dir: env::var("BOOK_DIR").unwrap_or_else(|_| "book".to_string()),
            move_delay: Duration::from_millis(env_ms("MOVE_DELAY_MS", 400)),
            pair_delay: Duration::from_millis(env_ms("PAIR_DELAY_MS", 800)),
        }
    }
}

fn env_ms(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
