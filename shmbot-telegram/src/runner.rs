//! Dispatcher: turns teloxide messages and button presses into core events and runs them through the HandlerChain.
//! A `Reply` from the chain goes back privately: as a callback alert for button presses, as a reply for messages.

use std::sync::Arc;

use anyhow::Result;
use handler_chain::HandlerChain;
use shmbot_core::{Bot as CoreBot, HandlerResponse, ToCoreEvent};
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::Update;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, instrument, warn};

use super::adapters::{parse_command, Command, TelegramCallbackWrapper, TelegramMessageWrapper};

/// Shared by every update endpoint.
#[derive(Clone)]
struct RunnerContext {
    chain: HandlerChain,
    core_bot: Arc<dyn CoreBot>,
    bot_username: Arc<String>,
}

/// Text sent for `/help`.
pub fn help_text() -> String {
    Command::descriptions().to_string()
}

fn schema() -> UpdateHandler<anyhow::Error> {
    dptree::entry()
        .branch(Update::filter_callback_query().endpoint(on_callback))
        .branch(Update::filter_message().endpoint(on_message))
}

/// Resolves the bot's username (for `/cmd@bot` parsing), registers the command list, then dispatches
/// updates until Ctrl-C. `core_bot` is used for message replies.
#[instrument(skip(bot, handler_chain, core_bot))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    core_bot: Arc<dyn CoreBot>,
) -> Result<()> {
    let bot_username = match bot.get_me().await {
        Ok(me) => me.user.username.clone().unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "get_me failed, commands addressed with @username will be ignored");
            String::new()
        }
    };
    info!(username = %bot_username, "Bot username set before dispatch");

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let context = RunnerContext {
        chain: handler_chain,
        core_bot,
        bot_username: Arc::new(bot_username),
    };

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![context])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn on_message(bot: Bot, msg: Message, context: RunnerContext) -> Result<()> {
    let command = msg
        .text()
        .and_then(|text| parse_command(text, &context.bot_username));
    if command == Some(Command::Help) {
        bot.send_message(msg.chat.id, help_text()).await?;
        return Ok(());
    }

    let Some(event) = TelegramMessageWrapper(&msg, &context.bot_username).to_core() else {
        return Ok(());
    };

    tokio::spawn(async move {
        info!(
            user_id = event.user.id,
            chat_id = event.chat.id,
            message_id = %event.id,
            "step: processing message (handler chain started)"
        );
        match context.chain.handle(&event).await {
            Ok(HandlerResponse::Reply(text)) => {
                if let Err(e) = context.core_bot.reply_to(&event, &text).await {
                    error!(error = %e, user_id = event.user.id, "Failed to send reply");
                }
            }
            Ok(_) => {}
            Err(e) => error!(error = %e, user_id = event.user.id, "Handler chain failed"),
        }
    });

    Ok(())
}

async fn on_callback(bot: Bot, q: CallbackQuery, context: RunnerContext) -> Result<()> {
    let Some(event) = TelegramCallbackWrapper(&q).to_core() else {
        warn!(data = ?q.data, user_id = q.from.id.0, "Unknown callback ignored");
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    tokio::spawn(async move {
        info!(
            user_id = event.user.id,
            chat_id = event.chat.id,
            kind = ?event.kind,
            "step: processing button press (handler chain started)"
        );
        let notice = match context.chain.handle(&event).await {
            Ok(HandlerResponse::Reply(text)) => Some(text),
            Ok(_) => None,
            Err(e) => {
                error!(error = %e, user_id = event.user.id, "Handler chain failed");
                None
            }
        };

        // Every press is answered so the client stops its spinner.
        let answer = bot.answer_callback_query(q.id.clone());
        let answer = match notice {
            Some(text) => answer.text(text).show_alert(true),
            None => answer,
        };
        if let Err(e) = answer.await {
            error!(error = %e, user_id = event.user.id, "Failed to answer callback query");
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_command() {
        let help = help_text();
        for command in ["/crocodile", "/stop_crocodile", "/end_crocodile", "/crocodile_stop", "/help"] {
            assert!(help.contains(command), "missing {} in {}", command, help);
        }
    }
}
