//! # middleware
//!
//! Cross-cutting handlers placed in front of the game handler: event logging and the chat allowlist.

mod logging_auth;

#[cfg(test)]
mod test;

pub use logging_auth::{ChatFilterHandler, LoggingHandler};
