//! Wire DTOs for the agent endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound request: the full conversation history.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRequest {
    pub messages: Vec<MessageDto>,
}

/// One turn as the chat surface sends it.
///
/// `source` stays a free string on the wire; anything other than `"user"`
/// is simply never selected as the driving turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source: String,
}

/// Outbound response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponse {
    /// JSON-encoded payload for the chat surface to render.
    pub chat_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent_details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_messages: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_intent: Option<String>,
}

/// Error body for 4xx/5xx responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_request_deserializes() {
        let request: MessageRequest = serde_json::from_str(
            r#"{"messages": [{"content": "hi", "source": "user"}, {"content": "hello!", "source": "assistant"}]}"#,
        )
        .unwrap();

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].source, "user");
    }

    #[test]
    fn message_dto_tolerates_missing_fields() {
        let dto: MessageDto = serde_json::from_str("{}").unwrap();
        assert_eq!(dto.content, "");
        assert_eq!(dto.source, "");
    }

    #[test]
    fn agent_response_omits_absent_fields() {
        let response = AgentResponse {
            chat_message: "{}".to_string(),
            intent: None,
            intent_details: None,
            inner_messages: None,
            user_intent: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("intent").is_none());
        assert!(json.get("inner_messages").is_none());
    }
}
