//! Wires config, logging, the game engine and the handler chain, then hands over to the Telegram dispatcher.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use crocodile::{GameConfig, GameEngine, GameHandler};
use handler_chain::HandlerChain;
use middleware::{ChatFilterHandler, LoggingHandler};
use shmbot_core::{init_tracing, Bot};
use shmbot_telegram::{run_dispatcher, TelegramBotAdapter};
use tracing::{info, instrument};

use crate::config::BotConfig;

/// Logging first, then the chat filter, then the game.
pub fn build_handler_chain(allowed_chat: Option<i64>, engine: GameEngine) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(ChatFilterHandler::new(allowed_chat)))
        .add_handler(Arc::new(GameHandler::new(engine)))
}

/// Main entry: validate config, init logging, build the engine and chain, then run the dispatcher.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.telegram.log_file)?;

    let teloxide_bot = config.telegram.build_bot();
    let core_bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let engine = GameEngine::from_config(core_bot.clone(), config.game.clone())
        .context("Failed to load the word list")?;

    info!(
        chat_id = ?config.telegram.chat_id,
        reservation_secs = config.game.reservation.as_secs(),
        timeout_secs = config.game.game_timeout.as_secs(),
        "Initializing bot"
    );

    let chain = build_handler_chain(config.telegram.chat_id, engine);

    info!("Bot started successfully");
    run_dispatcher(teloxide_bot, chain, core_bot).await
}

/// Distinct words in `file`, or in the list the game config points at when no file is given.
pub fn word_count(file: Option<PathBuf>) -> Result<usize> {
    let mut config = GameConfig::from_env()?;
    if file.is_some() {
        config.words_file = file;
    }
    let source = config
        .words_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());
    let bank = config
        .load_word_bank()
        .with_context(|| format!("Failed to load word list ({})", source))?;
    Ok(bank.len())
}
