//! Wraps teloxide::Bot and implements [`shmbot_core::Bot`]. Production code sends messages via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use shmbot_core::{
    parse_message_id, Bot as CoreBot, Chat, InboundEvent, Keyboard, Result, ShmbotError,
};
use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ReplyParameters},
};

/// Converts a core [`Keyboard`] into Telegram callback buttons.
pub fn to_inline_keyboard(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.data.clone()))
            .collect::<Vec<_>>()
    }))
}

fn bot_error(e: teloxide::RequestError) -> ShmbotError {
    ShmbotError::Bot(e.to_string())
}

/// Thin wrapper around teloxide::Bot that implements shmbot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn send_with_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(to_inline_keyboard(keyboard))
            .await
            .map_err(bot_error)?;
        Ok(sent.id.to_string())
    }

    // Editing without reply_markup removes the inline keyboard.
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text)
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn reply_to(&self, event: &InboundEvent, text: &str) -> Result<()> {
        let request = self.bot.send_message(ChatId(event.chat.id), text.to_string());
        let request = match parse_message_id(&event.id) {
            Ok(id) => request.reply_parameters(ReplyParameters::new(MessageId(id))),
            Err(_) => request,
        };
        request.await.map_err(bot_error)?;
        Ok(())
    }
}
