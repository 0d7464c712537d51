//! The single active game's data. Only [`crate::GameEngine`] mutates it.

use shmbot_core::{Chat, User};

use crate::error::{GameError, Result};

/// Where the game currently is in the presenter handoff cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A presenter is explaining the word; chat messages are checked as guesses.
    AwaitingGuess,
    /// The word was guessed; waiting for somebody to take over as presenter.
    AwaitingClaim,
}

#[derive(Debug, Clone)]
pub struct GameState {
    chat: Chat,
    word: String,
    presenter: Option<User>,
    reserved_presenter: Option<User>,
    /// Id of the correct-guess message carrying the claim button, once it was sent.
    claim_message: Option<String>,
}

/// Guesses match regardless of case and surrounding whitespace.
pub fn normalize_guess(text: &str) -> String {
    text.trim().to_lowercase()
}

impl GameState {
    pub(crate) fn new(chat: Chat, presenter: User, word: String) -> Self {
        Self {
            chat,
            word,
            presenter: Some(presenter),
            reserved_presenter: None,
            claim_message: None,
        }
    }

    pub fn chat(&self) -> &Chat {
        &self.chat
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn presenter(&self) -> Option<&User> {
        self.presenter.as_ref()
    }

    pub fn reserved_presenter(&self) -> Option<&User> {
        self.reserved_presenter.as_ref()
    }

    pub fn claim_message(&self) -> Option<&str> {
        self.claim_message.as_deref()
    }

    pub fn phase(&self) -> Phase {
        if self.presenter.is_some() {
            Phase::AwaitingGuess
        } else {
            Phase::AwaitingClaim
        }
    }

    pub fn is_presenter(&self, user: &User) -> bool {
        self.presenter.as_ref() == Some(user)
    }

    /// True when `text` names the current word and comes from someone other than the presenter.
    /// Never true while nobody is presenting, so the claim window cannot be re-triggered.
    pub fn is_correct_guess(&self, guesser: &User, text: &str) -> bool {
        match &self.presenter {
            Some(presenter) if presenter != guesser => normalize_guess(text) == self.word,
            _ => false,
        }
    }

    /// Swaps in a new word without touching the presenter.
    pub(crate) fn replace_word(&mut self, word: String) {
        self.word = word;
    }

    /// Correct guess: the presenter steps down, the guesser gets first right to take over.
    pub(crate) fn hand_off(&mut self, guesser: User, next_word: String) {
        self.presenter = None;
        self.reserved_presenter = Some(guesser);
        self.word = next_word;
        self.claim_message = None;
    }

    /// Checks whether `claimant` may become presenter right now.
    pub(crate) fn check_claim(&self, claimant: &User) -> Result<()> {
        match (&self.presenter, &self.reserved_presenter) {
            (Some(_), _) => Err(GameError::ClaimConflict),
            (None, Some(reserved)) if reserved == claimant => Ok(()),
            (None, Some(_)) => Err(GameError::NotAuthorized),
            (None, None) => Ok(()),
        }
    }

    /// Installs `claimant` as presenter and closes the handoff. Returns the claim message id, if any.
    pub(crate) fn install_presenter(&mut self, claimant: User) -> Option<String> {
        self.presenter = Some(claimant);
        self.reserved_presenter = None;
        self.claim_message.take()
    }

    /// Drops the outstanding reservation, opening the claim to everyone.
    pub(crate) fn lapse_reservation(&mut self) -> Option<User> {
        self.reserved_presenter.take()
    }

    pub(crate) fn set_claim_message(&mut self, message_id: String) {
        self.claim_message = Some(message_id);
    }

    pub(crate) fn take_claim_message(&mut self) -> Option<String> {
        self.claim_message.take()
    }
}
