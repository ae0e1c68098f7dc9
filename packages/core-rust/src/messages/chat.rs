//! Chat schemas for the `send-chat-message` command.

use serde::{Deserialize, Serialize};

/// Params for `send-chat-message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendChatMessageParams {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub speaker: Option<String>,
}

/// Result for `send-chat-message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageResult {
    pub sent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_deserialize_without_speaker() {
        let params: SendChatMessageParams =
            serde_json::from_str(r#"{"content":"The goblin flees!"}"#).unwrap();
        assert_eq!(params.content, "The goblin flees!");
        assert!(params.speaker.is_none());
    }
}
