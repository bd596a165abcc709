//! Canned answers for degraded-mode informational queries.
//!
//! When retrieval is unavailable (missing credential, empty index, transport
//! failure) the info handler answers from this static topic classifier
//! instead. This path must never fail.

use once_cell::sync::Lazy;
use serde::Serialize;

/// Degraded-mode answer topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoTopic {
    ReturnPolicy,
    ContactDetails,
    CurrentOffers,
    General,
}

impl InfoTopic {
    /// Wire name of the topic.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoTopic::ReturnPolicy => "return_policy",
            InfoTopic::ContactDetails => "contact_details",
            InfoTopic::CurrentOffers => "current_offers",
            InfoTopic::General => "general",
        }
    }
}

/// A canned answer with its classified topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackAnswer {
    pub topic: InfoTopic,
    pub answer: &'static str,
}

static RETURN_KEYWORDS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["return", "refund", "exchange", "policy"]);

static CONTACT_KEYWORDS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["contact", "phone", "email", "support", "address", "reach"]);

static OFFER_KEYWORDS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["offer", "discount", "sale", "promotion", "deal", "coupon"]);

const RETURN_POLICY_ANSWER: &str = "Our standard return/exchange window is 7\u{2013}14 days for unused items with original tags and receipt. Certain items may be non-returnable. For exact policy details, please refer to our Return Policy page or contact support.";

const CONTACT_DETAILS_ANSWER: &str = "You can reach support via email at support@example.com or phone at +1-000-000-0000. Business hours: Mon\u{2013}Fri, 9am\u{2013}6pm IST.";

const CURRENT_OFFERS_ANSWER: &str = "Current promotions vary by season. Please check the Offers page or sign up for our newsletter/app notifications for the latest discounts and coupon codes.";

const GENERAL_ANSWER: &str =
    "I can help with return policy, contact details, or current offers. Please specify your question.";

/// Classifies `message` into a degraded-mode topic and returns its canned
/// answer. Total over all inputs.
pub fn fallback_answer(message: &str) -> FallbackAnswer {
    let lower = message.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if contains_any(&RETURN_KEYWORDS) {
        FallbackAnswer {
            topic: InfoTopic::ReturnPolicy,
            answer: RETURN_POLICY_ANSWER,
        }
    } else if contains_any(&CONTACT_KEYWORDS) {
        FallbackAnswer {
            topic: InfoTopic::ContactDetails,
            answer: CONTACT_DETAILS_ANSWER,
        }
    } else if contains_any(&OFFER_KEYWORDS) {
        FallbackAnswer {
            topic: InfoTopic::CurrentOffers,
            answer: CURRENT_OFFERS_ANSWER,
        }
    } else {
        FallbackAnswer {
            topic: InfoTopic::General,
            answer: GENERAL_ANSWER,
        }
    }
}
