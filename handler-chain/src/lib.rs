//! # Handler chain
//!
//! Runs a sequence of handlers for each inbound event in three phases: every `before` in order
//! (any may veto the event), then `handle` until one returns Stop or Reply, then every `after`
//! in reverse order with the final response.

use shmbot_core::{Handler, HandlerResponse, InboundEvent, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

fn handler_name(handler: &Arc<dyn Handler>) -> &'static str {
    std::any::type_name_of_val(handler.as_ref())
}

/// Ordered chain of handlers. Cloning is cheap; handlers are shared.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler; handlers run in insertion order.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the three phases and returns the first Stop or Reply, or Continue.
    /// A vetoed event yields Stop and skips every `after`.
    #[instrument(skip(self, event), fields(event_id = %event.id, kind = ?event.kind))]
    pub async fn handle(&self, event: &InboundEvent) -> Result<HandlerResponse> {
        if let Some(vetoed_by) = self.run_before(event).await? {
            info!(
                user_id = event.user.id,
                chat_id = event.chat.id,
                handler = %vetoed_by,
                "step: event vetoed in before phase"
            );
            return Ok(HandlerResponse::Stop);
        }

        let response = self.run_handle(event).await?;

        for handler in self.handlers.iter().rev() {
            handler.after(event, &response).await?;
        }

        debug!(response = ?response, "step: handler chain finished");
        Ok(response)
    }

    /// Name of the handler whose `before` returned false, if any.
    async fn run_before(&self, event: &InboundEvent) -> Result<Option<&'static str>> {
        for handler in &self.handlers {
            if !handler.before(event).await? {
                return Ok(Some(handler_name(handler)));
            }
        }
        Ok(None)
    }

    async fn run_handle(&self, event: &InboundEvent) -> Result<HandlerResponse> {
        for handler in &self.handlers {
            let response = handler.handle(event).await?;
            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    debug!(
                        handler = %handler_name(handler),
                        replied = matches!(response, HandlerResponse::Reply(_)),
                        "Handler ended the handle phase"
                    );
                    return Ok(response);
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => {}
            }
        }
        Ok(HandlerResponse::Continue)
    }
}

// Integration tests live in tests/handler_chain_test.rs
