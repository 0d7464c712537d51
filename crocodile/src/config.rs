//! Game timing and vocabulary config. Loaded from env: CROCODILE_RESERVATION_SECS,
//! CROCODILE_TIMEOUT_SECS, CROCODILE_WORDS_FILE.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::error::GameError;
use crate::word_bank::WordBank;

const DEFAULT_RESERVATION_SECS: u64 = 7;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// After a correct guess, how long the guesser alone may claim the presenter role.
    pub reservation: Duration,
    /// After a correct guess, how long until an unclaimed game is ended.
    pub game_timeout: Duration,
    /// Vocabulary file; the built-in list is used when unset.
    pub words_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            reservation: Duration::from_secs(DEFAULT_RESERVATION_SECS),
            game_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            words_file: None,
        }
    }
}

fn secs_from_env(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a whole number of seconds, got {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

impl GameConfig {
    /// Loads from environment variables, falling back to 7s / 60s and the built-in word list.
    pub fn from_env() -> Result<Self> {
        let reservation = secs_from_env("CROCODILE_RESERVATION_SECS", DEFAULT_RESERVATION_SECS)?;
        let game_timeout = secs_from_env("CROCODILE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let words_file = env::var("CROCODILE_WORDS_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            reservation: Duration::from_secs(reservation),
            game_timeout: Duration::from_secs(game_timeout),
            words_file,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.reservation.is_zero() {
            bail!("CROCODILE_RESERVATION_SECS must be greater than zero");
        }
        if self.game_timeout <= self.reservation {
            bail!(
                "CROCODILE_TIMEOUT_SECS ({}s) must be greater than CROCODILE_RESERVATION_SECS ({}s)",
                self.game_timeout.as_secs(),
                self.reservation.as_secs()
            );
        }
        Ok(())
    }

    /// Builds the word bank from `words_file`, or the built-in list.
    pub fn load_word_bank(&self) -> std::result::Result<WordBank, GameError> {
        match &self.words_file {
            Some(path) => WordBank::from_file(path),
            None => WordBank::builtin(),
        }
    }
}
