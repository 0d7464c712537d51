//! Unit tests for LoggingHandler and ChatFilterHandler.

use crate::{ChatFilterHandler, LoggingHandler};
use shmbot_core::{Chat, EventKind, Handler, HandlerResponse, InboundEvent, User};

fn sample_event(chat_id: i64, kind: EventKind) -> InboundEvent {
    InboundEvent::new(
        "msg-1",
        User {
            id: 7,
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        Chat {
            id: chat_id,
            chat_type: "group".to_string(),
        },
        kind,
    )
}

#[tokio::test]
async fn test_logging_handler_before_continues() {
    let handler = LoggingHandler;
    let event = sample_event(1, EventKind::Text("hello".to_string()));
    assert!(handler.before(&event).await.unwrap());
}

#[tokio::test]
async fn test_logging_handler_after_ok() {
    let handler = LoggingHandler;
    let event = sample_event(1, EventKind::ShowWord);
    let response = HandlerResponse::Reply("кот".to_string());
    assert!(handler.after(&event, &response).await.is_ok());
}

#[tokio::test]
async fn test_chat_filter_allows_configured_chat() {
    let handler = ChatFilterHandler::new(Some(-100));
    let event = sample_event(-100, EventKind::StartGame);
    assert!(handler.before(&event).await.unwrap());
}

#[tokio::test]
async fn test_chat_filter_stops_foreign_chat() {
    let handler = ChatFilterHandler::new(Some(-100));
    let event = sample_event(-200, EventKind::StartGame);
    assert!(!handler.before(&event).await.unwrap());
}

#[tokio::test]
async fn test_chat_filter_without_chat_allows_everything() {
    let handler = ChatFilterHandler::new(None);
    let event = sample_event(-200, EventKind::ClaimPresenter);
    assert!(handler.before(&event).await.unwrap());
}
