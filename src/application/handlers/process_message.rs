//! ProcessMessageHandler - the workflow orchestrator.
//!
//! One run is a linear state machine: classify the message, dispatch to
//! exactly one handler, assemble the envelope. The orchestrator is a total
//! function from message to envelope: handlers are infallible by signature
//! (they embed errors in their payloads), and a latent panic anywhere in
//! the run is still caught and converted to an `intent:"error"` envelope.

use futures::FutureExt;
use serde_json::json;
use tracing::Instrument;
use uuid::Uuid;

use crate::domain::{AgentEnvelope, AgentOutcome, Intent};

use super::classify_intent::ClassifyIntentHandler;
use super::create_order::CreateOrderHandler;
use super::info_search::InfoSearchHandler;
use super::order_status::OrderStatusHandler;
use super::product_search::ProductSearchHandler;

/// Orchestrates one workflow run per user message.
pub struct ProcessMessageHandler {
    classifier: ClassifyIntentHandler,
    product_search: ProductSearchHandler,
    create_order: CreateOrderHandler,
    order_status: OrderStatusHandler,
    info_search: InfoSearchHandler,
}

impl ProcessMessageHandler {
    pub fn new(
        classifier: ClassifyIntentHandler,
        product_search: ProductSearchHandler,
        create_order: CreateOrderHandler,
        order_status: OrderStatusHandler,
        info_search: InfoSearchHandler,
    ) -> Self {
        Self {
            classifier,
            product_search,
            create_order,
            order_status,
            info_search,
        }
    }

    /// Processes `message` through classify -> handle -> envelope.
    ///
    /// Never fails and never panics across this boundary.
    pub async fn handle(&self, message: &str) -> AgentEnvelope {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("workflow_run", %run_id);

        let run = async {
            let classification = self.classifier.handle(message).await;
            let intent = classification.intent;
            tracing::debug!(%intent, "dispatching");

            let payload = match intent {
                Intent::ProductSearch => self.product_search.handle(message).await,
                Intent::OrderCreation => self.create_order.handle(message).await,
                Intent::OrderStatus => self.order_status.handle(message).await,
                Intent::InfoSearch => self.info_search.handle(message).await,
            };

            AgentEnvelope::new(
                message,
                classification.details,
                AgentOutcome::for_intent(intent, payload),
            )
        };

        match std::panic::AssertUnwindSafe(run).catch_unwind().instrument(span).await {
            Ok(envelope) => envelope,
            Err(panic) => {
                let reason = panic_message(panic);
                tracing::error!(%reason, "workflow run panicked");
                AgentEnvelope::new(
                    message,
                    json!({"error": reason}),
                    AgentOutcome::Error(json!({
                        "error": format!("Workflow processing failed: {}", reason)
                    })),
                )
            }
        }
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
