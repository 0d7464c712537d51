use thiserror::Error;

/// Why a game transition was refused. Every variant is recovered locally and turned into a
/// notice for the caller; none of them is fatal.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("No game is running")]
    NoActiveGame,

    #[error("A game is already running")]
    AlreadyRunning,

    #[error("Caller is not allowed to do this")]
    NotAuthorized,

    #[error("Presenter role was already claimed")]
    ClaimConflict,

    #[error("Word pool is exhausted")]
    WordPoolExhausted,

    #[error("Failed to read word list: {0}")]
    WordList(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
