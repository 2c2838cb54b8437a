//! Wire types for the Ollama chat API and the step protocol.
//!
//! Serde-serializable to JSON for HTTP calls. The model's reply content is
//! itself a JSON document that must decode into a `StepRecord`.

use serde::{Deserialize, Serialize};

/// A single message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

/// Request body for the Ollama chat API.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub stream: bool,
    /// Always "json" — without it Ollama rarely produces decodable steps.
    pub format: String,
    pub options: ChatOptions,
}

/// Decoding options passed through to the model.
#[derive(Debug, Serialize)]
pub struct ChatOptions {
    pub num_predict: u32,
    pub temperature: f32,
}

/// Response from the Ollama chat API. Ollama sends more fields
/// (timings, done flags); only the message matters here.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub message: Message,
}

/// What the model says comes after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    Continue,
    FinalAnswer,
}

/// One decoded reasoning step.
///
/// Strict shape: a reply missing title, content, or next_action is
/// rejected rather than default-filled, and a confidence outside 0-100
/// is rejected the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    pub next_action: NextAction,
}

impl StepRecord {
    /// Decode a step from the model's reply content.
    pub fn parse(raw: &str) -> Result<StepRecord, String> {
        let record: StepRecord =
            serde_json::from_str(raw).map_err(|e| format!("malformed step JSON: {e}"))?;
        if let Some(c) = record.confidence {
            if c > 100 {
                return Err(format!("confidence {c} out of range (0-100)"));
            }
        }
        Ok(record)
    }

    /// Serialize for appending to the conversation as an assistant turn.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".into())
    }
}
