//! Integration tests for [`crocodile::GameHandler`], alone and behind the middleware chain.

mod common;

use std::sync::Arc;

use common::{alice, bob, carol, chat, engine, engine_with, test_config, Sent};
use crocodile::{texts, GameError, GameHandler};
use handler_chain::HandlerChain;
use middleware::{ChatFilterHandler, LoggingHandler};
use shmbot_core::{Chat, EventKind, Handler, HandlerResponse, InboundEvent, User};

fn event(user: User, kind: EventKind) -> InboundEvent {
    InboundEvent::new("evt", user, chat(), kind)
}

#[tokio::test]
async fn test_start_and_end_commands() {
    let (engine, _bot) = engine();
    let handler = GameHandler::new(engine.clone());

    let response = handler.handle(&event(alice(), EventKind::StartGame)).await.unwrap();
    assert_eq!(response, HandlerResponse::Stop);
    assert!(engine.is_running().await);

    let response = handler.handle(&event(bob(), EventKind::StartGame)).await.unwrap();
    assert_eq!(response, HandlerResponse::Reply(texts::already_running()));

    let response = handler.handle(&event(bob(), EventKind::EndGame)).await.unwrap();
    assert_eq!(response, HandlerResponse::Stop);

    let response = handler.handle(&event(bob(), EventKind::EndGame)).await.unwrap();
    assert_eq!(response, HandlerResponse::Reply(texts::not_running()));
    assert!(!engine.is_running().await);
}

#[tokio::test]
async fn test_show_word_replies_privately() {
    let (engine, bot) = engine_with(&["xylofon", "quaxle"], test_config());
    let handler = GameHandler::new(engine.clone());
    handler.handle(&event(alice(), EventKind::StartGame)).await.unwrap();
    let word = engine.reveal_word(&alice()).await.unwrap();

    let response = handler.handle(&event(alice(), EventKind::ShowWord)).await.unwrap();
    assert_eq!(response, HandlerResponse::Reply(texts::your_word(&word)));

    let response = handler.handle(&event(bob(), EventKind::ShowWord)).await.unwrap();
    let expected = texts::refusal(&EventKind::ShowWord, &GameError::NotAuthorized);
    assert_eq!(response, HandlerResponse::Reply(expected.clone()));
    assert!(!expected.contains(&word));

    // Private answers go back through the transport, never to the group.
    assert!(bot.texts().iter().all(|t| !t.contains(&word)));
}

#[tokio::test]
async fn test_next_word_only_for_presenter() {
    let (engine, _bot) = engine();
    let handler = GameHandler::new(engine.clone());
    handler.handle(&event(alice(), EventKind::StartGame)).await.unwrap();
    let before = engine.reveal_word(&alice()).await.unwrap();

    let denied = handler.handle(&event(carol(), EventKind::NextWord)).await.unwrap();
    assert!(matches!(denied, HandlerResponse::Reply(_)));
    assert_eq!(engine.reveal_word(&alice()).await.unwrap(), before);

    let response = handler.handle(&event(alice(), EventKind::NextWord)).await.unwrap();
    let after = engine.reveal_word(&alice()).await.unwrap();
    assert_ne!(after, before);
    assert_eq!(response, HandlerResponse::Reply(texts::new_word(&after)));
}

#[tokio::test]
async fn test_text_guess_and_claim() {
    let (engine, _bot) = engine();
    let handler = GameHandler::new(engine.clone());
    handler.handle(&event(alice(), EventKind::StartGame)).await.unwrap();
    let word = engine.reveal_word(&alice()).await.unwrap();

    let miss = handler
        .handle(&event(bob(), EventKind::Text("hello there".to_string())))
        .await
        .unwrap();
    assert_eq!(miss, HandlerResponse::Continue);

    let hit = handler.handle(&event(bob(), EventKind::Text(word))).await.unwrap();
    assert_eq!(hit, HandlerResponse::Stop);

    let denied = handler.handle(&event(carol(), EventKind::ClaimPresenter)).await.unwrap();
    assert_eq!(
        denied,
        HandlerResponse::Reply(texts::refusal(&EventKind::ClaimPresenter, &GameError::NotAuthorized))
    );

    let claimed = handler.handle(&event(bob(), EventKind::ClaimPresenter)).await.unwrap();
    assert_eq!(claimed, HandlerResponse::Stop);

    let late = handler.handle(&event(carol(), EventKind::ClaimPresenter)).await.unwrap();
    assert_eq!(
        late,
        HandlerResponse::Reply(texts::refusal(&EventKind::ClaimPresenter, &GameError::ClaimConflict))
    );
    assert!(engine.snapshot().await.unwrap().is_presenter(&bob()));
}

#[tokio::test]
async fn test_chain_filters_foreign_chat() {
    let (engine, bot) = engine();
    let chain = HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(ChatFilterHandler::new(Some(chat().id))))
        .add_handler(Arc::new(GameHandler::new(engine.clone())));

    let foreign = InboundEvent::new(
        "evt-foreign",
        alice(),
        Chat {
            id: 42,
            chat_type: "group".to_string(),
        },
        EventKind::StartGame,
    );
    assert_eq!(chain.handle(&foreign).await.unwrap(), HandlerResponse::Stop);
    assert!(!engine.is_running().await);
    assert!(bot.sent().is_empty());

    let home = event(alice(), EventKind::StartGame);
    assert_eq!(chain.handle(&home).await.unwrap(), HandlerResponse::Stop);
    assert!(engine.is_running().await);
    assert!(matches!(bot.sent().as_slice(), [Sent::WithKeyboard { .. }]));
}
