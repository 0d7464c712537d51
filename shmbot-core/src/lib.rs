//! # shmbot-core
//!
//! Core types and traits for the chat bot: [`Bot`], [`Handler`], inbound events, users, keyboards,
//! and tracing initialization. Transport-agnostic; used by shmbot-telegram, handler-chain and the game crates.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{Result, ShmbotError};
pub use logger::init_tracing;
pub use types::{
    Button, Chat, EventKind, Handler, HandlerResponse, InboundEvent, Keyboard, ToCoreEvent,
    ToCoreUser, User,
};
