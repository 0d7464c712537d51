//! # shmbot-cli
//!
//! CLI foundation: argument parsing, config loading, and wiring the game into the Telegram runner.

pub mod cli;
pub mod config;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use config::BotConfig;
pub use runner::{build_handler_chain, run_bot, word_count};
