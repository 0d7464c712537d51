//! Bot config: Telegram transport plus game settings, loaded from env.

use anyhow::Result;
use crocodile::GameConfig;
use shmbot_telegram::TelegramConfig;

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub game: GameConfig,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            telegram: TelegramConfig::load(token)?,
            game: GameConfig::from_env()?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        self.game.validate()
    }
}
