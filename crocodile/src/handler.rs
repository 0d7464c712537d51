//! Bridges the handler chain to the game engine: one inbound event, one transition.

use async_trait::async_trait;
use shmbot_core::{EventKind, Handler, HandlerResponse, InboundEvent, Result};
use tracing::{debug, instrument};

use crate::engine::GameEngine;
use crate::texts;

/// Dispatches [`EventKind`]s into engine transitions. Refusals become a private `Reply` for the caller;
/// plain text that is not a correct guess continues down the chain.
pub struct GameHandler {
    engine: GameEngine,
}

impl GameHandler {
    pub fn new(engine: GameEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }
}

#[async_trait]
impl Handler for GameHandler {
    #[instrument(skip(self, event), fields(user_id = event.user.id, chat_id = event.chat.id))]
    async fn handle(&self, event: &InboundEvent) -> Result<HandlerResponse> {
        let user = &event.user;
        let outcome = match &event.kind {
            EventKind::StartGame => self
                .engine
                .start_game(&event.chat, user)
                .await
                .map(|()| HandlerResponse::Stop),
            EventKind::EndGame => self
                .engine
                .end_game(&event.chat, user)
                .await
                .map(|()| HandlerResponse::Stop),
            EventKind::ShowWord => self
                .engine
                .reveal_word(user)
                .await
                .map(|word| HandlerResponse::Reply(texts::your_word(&word))),
            EventKind::NextWord => self
                .engine
                .skip_word(user)
                .await
                .map(|word| HandlerResponse::Reply(texts::new_word(&word))),
            EventKind::ClaimPresenter => self
                .engine
                .claim_presenter(&event.chat, user)
                .await
                .map(|()| HandlerResponse::Stop),
            EventKind::Text(text) => self.engine.guess(&event.chat, user, text).await.map(|correct| {
                if correct {
                    HandlerResponse::Stop
                } else {
                    HandlerResponse::Continue
                }
            }),
        };

        Ok(outcome.unwrap_or_else(|error| {
            debug!(error = %error, "Game transition refused");
            HandlerResponse::Reply(texts::refusal(&event.kind, &error))
        }))
    }
}
