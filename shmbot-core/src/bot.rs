//! Bot abstraction for outbound chat messages.
//!
//! [`Bot`] is transport-agnostic; shmbot-telegram implements it via teloxide and tests substitute recording doubles.

use crate::error::Result;
use crate::types::{Chat, InboundEvent, Keyboard};
use async_trait::async_trait;

/// Abstraction for sending and editing chat messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a message with an inline keyboard attached and returns its transport message id.
    async fn send_with_keyboard(&self, chat: &Chat, text: &str, keyboard: &Keyboard)
        -> Result<String>;
    /// Replaces the text of an already-sent message. Any keyboard attached to it is dropped.
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;
    /// Replies to the message that produced `event` (same chat).
    async fn reply_to(&self, event: &InboundEvent, text: &str) -> Result<()>;
}

/// Parses a message id string into an i32. Used by transports whose ids are numeric.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse().map_err(|_| {
        crate::error::ShmbotError::InvalidMessageId(s.to_string())
    })
}
