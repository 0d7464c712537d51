//! Core types: user, chat, inbound event, inline keyboard, handler response, and Handler trait.

use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Chat member identity (id, username, names). Two users are equal when their ids are equal.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Display form used in chat notices: `@username`, else the full name, else the numeric id.
    pub fn mention(&self) -> String {
        if let Some(username) = self.username.as_deref().filter(|u| !u.is_empty()) {
            return format!("@{}", username);
        }
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.id.to_string()
        } else {
            name
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Chat (group or private) identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// What an inbound event asks for. Commands and button presses map to one variant each;
/// any other chat text arrives as [`EventKind::Text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    StartGame,
    EndGame,
    ShowWord,
    NextWord,
    ClaimPresenter,
    Text(String),
}

const CALLBACK_SHOW_WORD: &str = "croc:show_word";
const CALLBACK_NEXT_WORD: &str = "croc:next_word";
const CALLBACK_CLAIM: &str = "croc:claim";

impl EventKind {
    /// Maps a button callback payload back to its event. Unknown payloads yield `None`.
    pub fn from_callback_data(data: &str) -> Option<Self> {
        match data {
            CALLBACK_SHOW_WORD => Some(Self::ShowWord),
            CALLBACK_NEXT_WORD => Some(Self::NextWord),
            CALLBACK_CLAIM => Some(Self::ClaimPresenter),
            _ => None,
        }
    }

    /// Callback payload for button-driven events; `None` for commands and text.
    pub fn callback_data(&self) -> Option<&'static str> {
        match self {
            Self::ShowWord => Some(CALLBACK_SHOW_WORD),
            Self::NextWord => Some(CALLBACK_NEXT_WORD),
            Self::ClaimPresenter => Some(CALLBACK_CLAIM),
            _ => None,
        }
    }

    /// True for events that came from an inline button rather than a message.
    pub fn is_button(&self) -> bool {
        self.callback_data().is_some()
    }
}

/// A single inbound event with its sender and chat.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    /// Transport id of the originating message or callback query.
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub kind: EventKind,
    pub received_at: DateTime<Utc>,
}

impl InboundEvent {
    pub fn new(id: impl Into<String>, user: User, chat: Chat, kind: EventKind) -> Self {
        Self {
            id: id.into(),
            user,
            chat,
            kind,
            received_at: Utc::now(),
        }
    }

    /// Text content for [`EventKind::Text`] events.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Inline button: visible label plus the callback payload sent back when pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Transport-agnostic inline keyboard (rows of buttons).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    /// Keyboard with one row holding the given buttons.
    pub fn row(buttons: Vec<Button>) -> Self {
        Self {
            rows: vec![buttons],
        }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

/// Handler result for the chain. `Reply(text)` carries a notice for the originating caller only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; nothing to tell the caller.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and answer the caller privately (e.g. the secret word, a denial).
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific update (message, callback query) to a core [`InboundEvent`].
/// Returns `None` when the update carries nothing the bot reacts to.
pub trait ToCoreEvent: Send + Sync {
    fn to_core(&self) -> Option<InboundEvent>;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _event: &InboundEvent) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the event. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _event: &InboundEvent) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _event: &InboundEvent,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
