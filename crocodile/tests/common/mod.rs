//! Shared helpers for crocodile integration tests: a recording [`Bot`] and sample users.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use crocodile::{GameConfig, GameEngine, WordBank};
use shmbot_core::{Bot, Chat, InboundEvent, Keyboard, Result, User};

/// One outbound call observed by [`RecordingBot`].
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Message { chat_id: i64, text: String },
    WithKeyboard { chat_id: i64, text: String, keyboard: Keyboard, message_id: String },
    Edit { chat_id: i64, message_id: String, text: String },
    Reply { event_id: String, text: String },
}

impl Sent {
    pub fn text(&self) -> &str {
        match self {
            Sent::Message { text, .. }
            | Sent::WithKeyboard { text, .. }
            | Sent::Edit { text, .. }
            | Sent::Reply { text, .. } => text,
        }
    }
}

/// Bot double that records every outbound call instead of talking to a chat.
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<Sent>>,
    next_id: AtomicUsize,
    /// Latency of plain `send_message` calls.
    send_delay: Duration,
}

impl RecordingBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Bot whose plain messages take `send_delay` to go out.
    pub fn with_send_delay(send_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            send_delay,
            ..Self::default()
        })
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().iter().map(|s| s.text().to_string()).collect()
    }

    pub fn keyboard_messages(&self) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|s| matches!(s, Sent::WithKeyboard { .. }))
            .collect()
    }

    fn record(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        if !self.send_delay.is_zero() {
            tokio::time::sleep(self.send_delay).await;
        }
        self.record(Sent::Message {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_with_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<String> {
        let message_id = (self.next_id.fetch_add(1, Ordering::SeqCst) + 1).to_string();
        self.record(Sent::WithKeyboard {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard: keyboard.clone(),
            message_id: message_id.clone(),
        });
        Ok(message_id)
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.record(Sent::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn reply_to(&self, event: &InboundEvent, text: &str) -> Result<()> {
        self.record(Sent::Reply {
            event_id: event.id.clone(),
            text: text.to_string(),
        });
        Ok(())
    }
}

pub const RESERVATION: Duration = Duration::from_secs(7);
pub const TIMEOUT: Duration = Duration::from_secs(60);

/// A second group the bot also sees when no chat is configured.
pub fn other_chat() -> Chat {
    Chat {
        id: -2002,
        chat_type: "supergroup".to_string(),
    }
}

pub fn chat() -> Chat {
    Chat {
        id: -1001,
        chat_type: "supergroup".to_string(),
    }
}

pub fn user(id: i64, name: &str) -> User {
    User {
        id,
        username: Some(name.to_string()),
        first_name: Some(name.to_string()),
        last_name: None,
    }
}

pub fn alice() -> User {
    user(1, "alice")
}

pub fn bob() -> User {
    user(2, "bob")
}

pub fn carol() -> User {
    user(3, "carol")
}

pub fn dave() -> User {
    user(4, "dave")
}

pub fn test_config() -> GameConfig {
    GameConfig {
        reservation: RESERVATION,
        game_timeout: TIMEOUT,
        words_file: None,
    }
}

/// Engine over a small fixed vocabulary and a recording bot.
pub fn engine_with(words: &[&str], config: GameConfig) -> (GameEngine, Arc<RecordingBot>) {
    engine_with_bot(words, config, RecordingBot::new())
}

pub fn engine_with_bot(
    words: &[&str],
    config: GameConfig,
    bot: Arc<RecordingBot>,
) -> (GameEngine, Arc<RecordingBot>) {
    let bank = WordBank::new(words.iter().copied()).unwrap();
    (GameEngine::new(bot.clone(), bank, config), bot)
}

pub fn engine() -> (GameEngine, Arc<RecordingBot>) {
    engine_with(&["кот", "мост", "ракета", "маяк", "зонт"], test_config())
}
