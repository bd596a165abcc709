//! Conversation turns supplied by the caller.
//!
//! The agent is stateless across requests: the full history arrives with
//! every call and only the most recent user turn drives processing.

use serde::{Deserialize, Serialize};

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// End customer input.
    User,
    /// Agent response.
    Assistant,
}

/// A single turn in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Turn text.
    pub content: String,
    /// Who sent this turn.
    pub source: Source,
}

impl ConversationTurn {
    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: Source::User,
        }
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: Source::Assistant,
        }
    }
}

/// Returns the content of the most recent user turn, if any.
pub fn latest_user_turn(turns: &[ConversationTurn]) -> Option<&str> {
    turns
        .iter()
        .rev()
        .find(|t| t.source == Source::User)
        .map(|t| t.content.as_str())
}
