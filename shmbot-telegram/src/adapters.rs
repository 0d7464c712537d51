//! Adapters from Telegram (teloxide) types to shmbot_core types.
//! Depends only on teloxide and shmbot_core type definitions.

use shmbot_core::{Chat, EventKind, InboundEvent, ToCoreEvent, ToCoreUser, User};
use teloxide::utils::command::BotCommands;

/// Commands the bot understands. The three stop aliases all end the game.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Команды игры «Крокодил»:")]
pub enum Command {
    #[command(description = "начать игру, ты будешь ведущим")]
    Crocodile,
    #[command(description = "завершить игру")]
    StopCrocodile,
    #[command(description = "завершить игру")]
    EndCrocodile,
    #[command(description = "завершить игру")]
    CrocodileStop,
    #[command(description = "показать эту справку")]
    Help,
}

impl Command {
    /// Game event for this command; `None` for commands answered by the transport itself.
    pub fn event_kind(&self) -> Option<EventKind> {
        match self {
            Command::Crocodile => Some(EventKind::StartGame),
            Command::StopCrocodile | Command::EndCrocodile | Command::CrocodileStop => {
                Some(EventKind::EndGame)
            }
            Command::Help => None,
        }
    }
}

/// Parses `text` as one of our commands. `bot_username` lets `/cmd@OurBot` through and rejects
/// commands addressed to other bots.
pub fn parse_command(text: &str, bot_username: &str) -> Option<Command> {
    if !text.starts_with('/') {
        return None;
    }
    Command::parse(text.trim(), bot_username).ok()
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    Chat {
        id: chat.id.0,
        chat_type: format!("{:?}", chat.kind),
    }
}

fn unknown_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
    }
}

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message plus the bot's own username for conversion to an [`InboundEvent`].
/// Commands become game events, other text becomes [`EventKind::Text`]; non-text messages and
/// `/help` yield `None`.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message, pub &'a str);

impl<'a> TelegramMessageWrapper<'a> {
    fn kind(&self) -> Option<EventKind> {
        let text = self.0.text()?;
        match parse_command(text, self.1) {
            Some(command) => command.event_kind(),
            None => Some(EventKind::Text(text.to_string())),
        }
    }
}

impl<'a> ToCoreEvent for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Option<InboundEvent> {
        let kind = self.kind()?;
        let user = self
            .0
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_core())
            .unwrap_or_else(unknown_user);

        Some(InboundEvent {
            id: self.0.id.to_string(),
            user,
            chat: core_chat(&self.0.chat),
            kind,
            received_at: self.0.date,
        })
    }
}

/// Wraps a teloxide CallbackQuery (inline button press) for conversion to an [`InboundEvent`].
/// Unknown payloads and presses on messages without a chat yield `None`.
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreEvent for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Option<InboundEvent> {
        let kind = self.0.data.as_deref().and_then(EventKind::from_callback_data)?;
        let chat = self.0.message.as_ref().map(|m| core_chat(m.chat()))?;

        Some(InboundEvent {
            id: self.0.id.to_string(),
            user: TelegramUserWrapper(&self.0.from).to_core(),
            chat,
            kind,
            received_at: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: TelegramUserWrapper converts teloxide User to core User with correct id, username, first_name, last_name.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("ru".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let wrapper = TelegramUserWrapper(&user);
        let core_user = wrapper.to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
    }

    /// **Test: every stop alias ends the game; /crocodile starts it; /help is not a game event.**
    #[test]
    fn test_command_aliases() {
        for text in ["/stop_crocodile", "/end_crocodile", "/crocodile_stop"] {
            let command = parse_command(text, "shm_bot").unwrap();
            assert_eq!(command.event_kind(), Some(EventKind::EndGame), "{}", text);
        }
        assert_eq!(
            parse_command("/crocodile", "shm_bot").and_then(|c| c.event_kind()),
            Some(EventKind::StartGame)
        );
        assert_eq!(parse_command("/help", "shm_bot"), Some(Command::Help));
        assert_eq!(Command::Help.event_kind(), None);
    }

    /// **Test: commands addressed to this bot parse; to another bot or plain text do not.**
    #[test]
    fn test_parse_command_respects_bot_username() {
        assert_eq!(
            parse_command("/crocodile@shm_bot", "shm_bot"),
            Some(Command::Crocodile)
        );
        assert_eq!(parse_command("/crocodile@other_bot", "shm_bot"), None);
        assert_eq!(parse_command("crocodile", "shm_bot"), None);
        assert_eq!(parse_command("/unknown", "shm_bot"), None);
    }
}
