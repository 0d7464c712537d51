//! # crocodile
//!
//! Presenter-handoff word game for a group chat. One member (the presenter) explains a secret word,
//! the others type guesses; whoever guesses first gets a short reservation to become the next presenter,
//! after which anyone may claim the role, and an unclaimed game ends on its own.
//!
//! [`GameEngine`] owns the game and talks to the chat only through [`shmbot_core::Bot`];
//! [`GameHandler`] plugs it into a handler chain.

pub mod config;
pub mod engine;
pub mod error;
pub mod handler;
pub mod state;
pub mod texts;
mod timer;
pub mod word_bank;

pub use config::GameConfig;
pub use engine::GameEngine;
pub use error::{GameError, Result};
pub use handler::GameHandler;
pub use state::{normalize_guess, GameState, Phase};
pub use word_bank::{parse_word_list, WordBank};
