//! Application handlers - one per workflow operation.
//!
//! Handlers compose the lenient LLM gateway, structured extraction, and the
//! external ports into the per-intent workflows. Every `handle` is
//! infallible: failures surface as error keys inside the returned payload.

mod classify_intent;
mod create_order;
mod info_search;
mod order_status;
mod process_message;
mod product_search;

pub use classify_intent::{Classification, ClassifyIntentHandler};
pub use create_order::CreateOrderHandler;
pub use info_search::InfoSearchHandler;
pub use order_status::OrderStatusHandler;
pub use process_message::ProcessMessageHandler;
pub use product_search::ProductSearchHandler;
