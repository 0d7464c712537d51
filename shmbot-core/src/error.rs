use thiserror::Error;

/// Failures of the outbound transport.
#[derive(Error, Debug)]
pub enum ShmbotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Invalid message id: {0}")]
    InvalidMessageId(String),
}

pub type Result<T> = std::result::Result<T, ShmbotError>;
