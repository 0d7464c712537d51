//! Chat-facing texts and keyboards for the game.

use shmbot_core::{Button, EventKind, Keyboard, User};

use crate::error::GameError;

pub const SHOW_WORD_LABEL: &str = "👀 Посмотреть слово";
pub const NEXT_WORD_LABEL: &str = "🔄 Следующее слово";
pub const CLAIM_LABEL: &str = "🙋 Хочу быть ведущим!";

fn button(label: &str, kind: EventKind) -> Option<Button> {
    kind.callback_data().map(|data| Button::new(label, data))
}

/// Buttons attached to the presenter announcement.
pub fn presenter_keyboard() -> Keyboard {
    Keyboard::row(
        [
            button(SHOW_WORD_LABEL, EventKind::ShowWord),
            button(NEXT_WORD_LABEL, EventKind::NextWord),
        ]
        .into_iter()
        .flatten()
        .collect(),
    )
}

/// Button attached to the correct-guess message.
pub fn claim_keyboard() -> Keyboard {
    Keyboard::row(button(CLAIM_LABEL, EventKind::ClaimPresenter).into_iter().collect())
}

pub fn presenter_announced(presenter: &User) -> String {
    format!(
        "🐊 Крокодил! Ведущий: {}.\nОбъясняй слово, не называя его. Остальные угадывают в чате.",
        presenter.mention()
    )
}

pub fn correct_guess(guesser: &User, word: &str) -> String {
    format!(
        "🎉 {} угадал(а) слово «{}»!\n{}, нажми кнопку, чтобы стать ведущим.",
        guesser.mention(),
        word,
        guesser.mention()
    )
}

pub fn reservation_lapsed(guesser: &User) -> String {
    format!(
        "⌛ {} не стал(а) ведущим. Теперь ведущим может стать любой!",
        guesser.mention()
    )
}

pub fn handoff_closed(presenter: &User) -> String {
    format!("Ведущим стал(а) {}.", presenter.mention())
}

pub fn handoff_expired() -> String {
    "Ведущего так и не нашлось.".to_string()
}

pub fn game_ended(by: &User) -> String {
    format!("🏁 {} завершил(а) игру.", by.mention())
}

pub fn game_ended_timeout() -> String {
    "🏁 Игра окончена: никто не стал ведущим.".to_string()
}

pub fn your_word(word: &str) -> String {
    format!("Твоё слово: {}", word)
}

pub fn new_word(word: &str) -> String {
    format!("Новое слово: {}", word)
}

pub fn already_running() -> String {
    "Игра уже идёт.".to_string()
}

pub fn not_running() -> String {
    "Игра не запущена.".to_string()
}

/// Notice for the caller whose event was refused with `error`.
pub fn refusal(kind: &EventKind, error: &GameError) -> String {
    match (kind, error) {
        (EventKind::EndGame, GameError::NoActiveGame) => not_running(),
        (_, GameError::NoActiveGame) => "Сейчас нет активной игры.".to_string(),
        (_, GameError::AlreadyRunning) => already_running(),
        (EventKind::ShowWord | EventKind::NextWord, GameError::NotAuthorized) => {
            "Слово видит только ведущий.".to_string()
        }
        (EventKind::ClaimPresenter, GameError::NotAuthorized) => {
            "Сейчас нельзя стать ведущим: очередь того, кто угадал.".to_string()
        }
        (_, GameError::NotAuthorized) => "Нет прав.".to_string(),
        (_, GameError::ClaimConflict) => "Сейчас нельзя стать ведущим: ведущий уже есть.".to_string(),
        (_, GameError::WordPoolExhausted | GameError::WordList(_)) => {
            "Не удалось выбрать слово.".to_string()
        }
    }
}
