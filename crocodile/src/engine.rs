//! Game engine: owns the single game, applies transitions under one lock, runs the expiry timer.
//!
//! Every transition takes the engine lock, validates, mutates, and captures what has to be said
//! to the chat. Messages are sent after the lock is released, so state order never depends on
//! network latency. A generation counter is bumped by every transition that invalidates a pending
//! timer; timer effects check it under the lock and do nothing when it moved on.

use std::sync::Arc;

use shmbot_core::{Bot, Chat, User};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::state::GameState;
use crate::texts;
use crate::timer::ExpiryTimer;
use crate::word_bank::WordBank;

struct EngineState {
    game: Option<GameState>,
    words: WordBank,
    generation: u64,
    expiry: Option<ExpiryTimer>,
}

impl EngineState {
    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Whether a game is running in `chat`. A game is invisible from every other chat.
    fn has_game_in(&self, chat: &Chat) -> bool {
        self.game.as_ref().is_some_and(|game| game.chat().id == chat.id)
    }

    fn cancel_expiry(&mut self) {
        if let Some(timer) = self.expiry.take() {
            debug!(timer_generation = timer.generation(), "Expiry timer cancelled");
            timer.cancel();
        }
    }
}

/// Chat output captured under the lock and delivered after it is released.
#[derive(Debug)]
enum Outbound {
    /// Presenter announcement with the show/next word buttons.
    Announce { chat: Chat, presenter: User },
    /// Correct-guess message with the claim button; its id is stored for `generation`.
    ClaimOffer {
        chat: Chat,
        guesser: User,
        word: String,
        generation: u64,
    },
    Text { chat: Chat, text: String },
    /// Rewrites an earlier message, dropping its buttons.
    Edit {
        chat: Chat,
        message_id: String,
        text: String,
    },
}

/// Turn-taking word-guessing game for one chat. Cloning is cheap and shares the same game.
#[derive(Clone)]
pub struct GameEngine {
    state: Arc<Mutex<EngineState>>,
    bot: Arc<dyn Bot>,
    config: GameConfig,
}

impl GameEngine {
    pub fn new(bot: Arc<dyn Bot>, words: WordBank, config: GameConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(EngineState {
                game: None,
                words,
                generation: 0,
                expiry: None,
            })),
            bot,
            config,
        }
    }

    /// Builds the engine with the word bank described by `config`.
    pub fn from_config(bot: Arc<dyn Bot>, config: GameConfig) -> Result<Self> {
        let words = config.load_word_bank()?;
        info!(words = words.len(), "Word bank loaded");
        Ok(Self::new(bot, words, config))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Copy of the current game, if one is running.
    pub async fn snapshot(&self) -> Option<GameState> {
        self.state.lock().await.game.clone()
    }

    pub async fn is_running(&self) -> bool {
        self.state.lock().await.game.is_some()
    }

    /// Starts a game with `requester` as presenter. Refused with `AlreadyRunning` while a game exists;
    /// the running game is left untouched.
    #[instrument(skip(self, chat, requester), fields(user_id = requester.id, chat_id = chat.id))]
    pub async fn start_game(&self, chat: &Chat, requester: &User) -> Result<()> {
        let outbound = {
            let mut state = self.state.lock().await;
            if state.game.is_some() {
                return Err(GameError::AlreadyRunning);
            }
            state.words.reset();
            let word = state.words.pick_word()?;
            state.cancel_expiry();
            let generation = state.next_generation();
            state.game = Some(GameState::new(chat.clone(), requester.clone(), word));
            info!(generation, "step: game started");

            Outbound::Announce {
                chat: chat.clone(),
                presenter: requester.clone(),
            }
        };

        self.deliver(vec![outbound]).await;
        Ok(())
    }

    /// Returns the current word, but only to the presenter.
    #[instrument(skip(self, caller), fields(user_id = caller.id))]
    pub async fn reveal_word(&self, caller: &User) -> Result<String> {
        let state = self.state.lock().await;
        let game = state.game.as_ref().ok_or(GameError::NoActiveGame)?;
        if !game.is_presenter(caller) {
            return Err(GameError::NotAuthorized);
        }
        Ok(game.word().to_string())
    }

    /// Replaces the word with a fresh one and returns it, only for the presenter.
    #[instrument(skip(self, caller), fields(user_id = caller.id))]
    pub async fn skip_word(&self, caller: &User) -> Result<String> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let game = state.game.as_mut().ok_or(GameError::NoActiveGame)?;
        if !game.is_presenter(caller) {
            return Err(GameError::NotAuthorized);
        }
        let word = state.words.pick_word()?;
        game.replace_word(word.clone());
        info!("step: word skipped");
        debug!(word = %word, "New word picked");
        Ok(word)
    }

    /// Checks a chat message against the word. On a match from anyone but the presenter the word is
    /// replaced, the presenter steps down, the guesser gets the reservation and the expiry timer starts.
    /// Returns whether the message was a correct guess; without a game in `chat` it never is.
    #[instrument(skip(self, chat, guesser, text), fields(user_id = guesser.id, chat_id = chat.id))]
    pub async fn guess(&self, chat: &Chat, guesser: &User, text: &str) -> Result<bool> {
        let outbound = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            let Some(game) = state.game.as_mut().filter(|game| game.chat().id == chat.id) else {
                return Ok(false);
            };
            if !game.is_correct_guess(guesser, text) {
                return Ok(false);
            }

            let next_word = state.words.pick_word()?;
            let guessed = game.word().to_string();
            game.hand_off(guesser.clone(), next_word);
            let chat = game.chat().clone();

            state.cancel_expiry();
            let generation = state.next_generation();
            let engine = self.clone();
            state.expiry = Some(ExpiryTimer::spawn(generation, async move {
                engine.run_expiry(generation).await;
            }));
            info!(generation, "step: word guessed, handoff reserved");

            Outbound::ClaimOffer {
                chat,
                guesser: guesser.clone(),
                word: guessed,
                generation,
            }
        };

        self.deliver(vec![outbound]).await;
        Ok(true)
    }

    /// Takes over the presenter role. The reserved guesser may always claim during the handoff;
    /// once the reservation lapsed anybody may. The word picked at the guess is kept.
    #[instrument(skip(self, chat, claimant), fields(user_id = claimant.id, chat_id = chat.id))]
    pub async fn claim_presenter(&self, chat: &Chat, claimant: &User) -> Result<()> {
        let outbound = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            let game = state
                .game
                .as_mut()
                .filter(|game| game.chat().id == chat.id)
                .ok_or(GameError::NoActiveGame)?;
            game.check_claim(claimant)?;

            let claim_message = game.install_presenter(claimant.clone());
            let chat = game.chat().clone();
            state.cancel_expiry();
            let generation = state.next_generation();
            info!(generation, "step: presenter claimed");

            let mut outbound = Vec::with_capacity(2);
            if let Some(message_id) = claim_message {
                outbound.push(Outbound::Edit {
                    chat: chat.clone(),
                    message_id,
                    text: texts::handoff_closed(claimant),
                });
            }
            outbound.push(Outbound::Announce {
                chat,
                presenter: claimant.clone(),
            });
            outbound
        };

        self.deliver(outbound).await;
        Ok(())
    }

    /// Ends the running game on request of anybody in its chat.
    #[instrument(skip(self, chat, caller), fields(user_id = caller.id, chat_id = chat.id))]
    pub async fn end_game(&self, chat: &Chat, caller: &User) -> Result<()> {
        let outbound = {
            let mut state = self.state.lock().await;
            if !state.has_game_in(chat) {
                return Err(GameError::NoActiveGame);
            }
            let mut game = state.game.take().ok_or(GameError::NoActiveGame)?;
            state.cancel_expiry();
            let generation = state.next_generation();
            info!(generation, "step: game ended by request");

            let chat = game.chat().clone();
            let mut outbound = Vec::with_capacity(2);
            if let Some(message_id) = game.take_claim_message() {
                outbound.push(Outbound::Edit {
                    chat: chat.clone(),
                    message_id,
                    text: texts::handoff_expired(),
                });
            }
            outbound.push(Outbound::Text {
                chat,
                text: texts::game_ended(caller),
            });
            outbound
        };

        self.deliver(outbound).await;
        Ok(())
    }

    /// Body of the expiry timer started by a correct guess.
    async fn run_expiry(&self, generation: u64) {
        tokio::time::sleep(self.config.reservation).await;
        if let Some(outbound) = self.lapse_reservation(generation).await {
            // A claim right after the lapse aborts this task; the notice must still go out.
            let engine = self.clone();
            tokio::spawn(async move { engine.deliver(vec![outbound]).await });
        }

        let remaining = self
            .config
            .game_timeout
            .saturating_sub(self.config.reservation);
        tokio::time::sleep(remaining).await;
        let outbound = self.expire_game(generation).await;
        self.deliver(outbound).await;
    }

    async fn lapse_reservation(&self, generation: u64) -> Option<Outbound> {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(generation, current = state.generation, "Stale reservation timer ignored");
            return None;
        }
        let game = state.game.as_mut()?;
        if game.presenter().is_some() {
            return None;
        }
        let guesser = game.lapse_reservation()?;
        info!(generation, user_id = guesser.id, "step: reservation lapsed");

        Some(Outbound::Text {
            chat: game.chat().clone(),
            text: texts::reservation_lapsed(&guesser),
        })
    }

    async fn expire_game(&self, generation: u64) -> Vec<Outbound> {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(generation, current = state.generation, "Stale expiry timer ignored");
            return Vec::new();
        }
        let unclaimed = state
            .game
            .as_ref()
            .is_some_and(|game| game.presenter().is_none());
        if !unclaimed {
            return Vec::new();
        }
        let Some(mut game) = state.game.take() else {
            return Vec::new();
        };

        // This task is the timer; drop its handle instead of aborting itself.
        if state.expiry.as_ref().map(ExpiryTimer::generation) == Some(generation) {
            state.expiry = None;
        }
        let next = state.next_generation();
        info!(generation = next, "step: game ended, nobody claimed the presenter role");

        let chat = game.chat().clone();
        let mut outbound = Vec::with_capacity(2);
        if let Some(message_id) = game.take_claim_message() {
            outbound.push(Outbound::Edit {
                chat: chat.clone(),
                message_id,
                text: texts::handoff_expired(),
            });
        }
        outbound.push(Outbound::Text {
            chat,
            text: texts::game_ended_timeout(),
        });
        outbound
    }

    /// Stores the id of a sent claim message, or closes the message right away when the handoff
    /// it belongs to is already over.
    async fn remember_claim_message(&self, generation: u64, chat: &Chat, message_id: String) {
        let closing_text = {
            let mut state = self.state.lock().await;
            let current = state.generation;
            match state.game.as_mut() {
                Some(game) if current == generation && game.presenter().is_none() => {
                    game.set_claim_message(message_id);
                    return;
                }
                Some(game) => match game.presenter() {
                    Some(presenter) => texts::handoff_closed(presenter),
                    None => texts::handoff_expired(),
                },
                None => texts::handoff_expired(),
            }
        };

        if let Err(e) = self.bot.edit_message(chat, &message_id, &closing_text).await {
            warn!(error = %e, chat_id = chat.id, "Failed to close stale claim message");
        }
    }

    async fn deliver(&self, outbound: Vec<Outbound>) {
        for item in outbound {
            let result = match item {
                Outbound::Announce { chat, presenter } => self
                    .bot
                    .send_with_keyboard(
                        &chat,
                        &texts::presenter_announced(&presenter),
                        &texts::presenter_keyboard(),
                    )
                    .await
                    .map(|_| ()),
                Outbound::ClaimOffer {
                    chat,
                    guesser,
                    word,
                    generation,
                } => match self
                    .bot
                    .send_with_keyboard(
                        &chat,
                        &texts::correct_guess(&guesser, &word),
                        &texts::claim_keyboard(),
                    )
                    .await
                {
                    Ok(message_id) => {
                        self.remember_claim_message(generation, &chat, message_id)
                            .await;
                        Ok(())
                    }
                    Err(e) => Err(e),
                },
                Outbound::Text { chat, text } => self.bot.send_message(&chat, &text).await,
                Outbound::Edit {
                    chat,
                    message_id,
                    text,
                } => self.bot.edit_message(&chat, &message_id, &text).await,
            };

            if let Err(e) = result {
                error!(error = %e, "Failed to deliver game notification");
            }
        }
    }
}
