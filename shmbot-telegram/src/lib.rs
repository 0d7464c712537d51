//! # shmbot-telegram
//!
//! Telegram transport layer: adapters from teloxide updates to [`shmbot_core::InboundEvent`],
//! the [`shmbot_core::Bot`] implementation, minimal config and the dispatcher runner.
//! Knows nothing about game rules; every update goes through the handler chain.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{
    parse_command, Command, TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper,
};
pub use bot_adapter::{to_inline_keyboard, TelegramBotAdapter};
pub use config::TelegramConfig;
pub use runner::{help_text, run_dispatcher};
