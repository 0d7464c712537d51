//! Handlers for logging and the chat allowlist.

use async_trait::async_trait;
use shmbot_core::{EventKind, Handler, HandlerResponse, InboundEvent, Result};
use tracing::{debug, info, instrument, warn};

/// Logs each event in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, event))]
    async fn before(&self, event: &InboundEvent) -> Result<bool> {
        let kind = match &event.kind {
            EventKind::Text(_) => "text",
            EventKind::StartGame => "start_game",
            EventKind::EndGame => "end_game",
            EventKind::ShowWord => "show_word",
            EventKind::NextWord => "next_word",
            EventKind::ClaimPresenter => "claim_presenter",
        };
        info!(
            user_id = event.user.id,
            username = %event.user.username.as_deref().unwrap_or("unknown"),
            chat_id = event.chat.id,
            kind = kind,
            "Received event"
        );
        Ok(true)
    }

    // Replies may carry the secret word, so they are only logged at debug level.
    #[instrument(skip(self, event, response))]
    async fn after(&self, event: &InboundEvent, response: &HandlerResponse) -> Result<()> {
        debug!(
            event_id = %event.id,
            response = ?response,
            "Processed event"
        );
        Ok(())
    }
}

/// Stops the chain for events from any chat other than the configured one.
/// With no chat configured every chat is served.
pub struct ChatFilterHandler {
    allowed_chat: Option<i64>,
}

impl ChatFilterHandler {
    pub fn new(allowed_chat: Option<i64>) -> Self {
        Self { allowed_chat }
    }
}

#[async_trait]
impl Handler for ChatFilterHandler {
    #[instrument(skip(self, event))]
    async fn before(&self, event: &InboundEvent) -> Result<bool> {
        match self.allowed_chat {
            Some(allowed) if allowed != event.chat.id => {
                warn!(
                    chat_id = event.chat.id,
                    user_id = event.user.id,
                    "Event from foreign chat ignored"
                );
                Ok(false)
            }
            _ => Ok(true),
        }
    }
}
