//! Intent taxonomy and the deterministic keyword fallback.
//!
//! The LLM classifier is the primary path; this module is what the agent
//! falls back to when the model output is unusable. Precedence between the
//! keyword sets is part of the contract: order-creation keywords win over
//! order-status keywords, which win over info keywords, and anything else
//! defaults to product search.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four routed intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ProductSearch,
    OrderCreation,
    OrderStatus,
    InfoSearch,
}

const ORDER_CREATION_KEYWORDS: &[&str] = &["buy", "purchase", "order", "add to cart"];

const ORDER_STATUS_KEYWORDS: &[&str] = &["track", "status", "order id", "tracking"];

const INFO_KEYWORDS: &[&str] = &[
    "return",
    "refund",
    "exchange",
    "contact",
    "phone",
    "email",
    "support",
    "address",
    "offer",
    "discount",
    "sale",
    "promotion",
    "deal",
];

impl Intent {
    /// Wire name of the intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::ProductSearch => "product_search",
            Intent::OrderCreation => "order_creation",
            Intent::OrderStatus => "order_status",
            Intent::InfoSearch => "info_search",
        }
    }

    /// Classifies a message by keyword scan alone.
    ///
    /// Order matters: a message containing both "buy" and "refund" is an
    /// order-creation request.
    pub fn from_keywords(message: &str) -> Intent {
        let lower = message.to_lowercase();
        let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

        if contains_any(ORDER_CREATION_KEYWORDS) {
            Intent::OrderCreation
        } else if contains_any(ORDER_STATUS_KEYWORDS) {
            Intent::OrderStatus
        } else if contains_any(INFO_KEYWORDS) {
            Intent::InfoSearch
        } else {
            Intent::ProductSearch
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product_search" => Ok(Intent::ProductSearch),
            "order_creation" => Ok(Intent::OrderCreation),
            "order_status" => Ok(Intent::OrderStatus),
            "info_search" => Ok(Intent::InfoSearch),
            _ => Err(()),
        }
    }
}
