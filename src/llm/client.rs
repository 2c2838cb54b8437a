//! Raw HTTP client for the Ollama chat API.
//!
//! No chain awareness — one POST, one decoded step.

use reqwest::Client;
use tracing::debug;

use super::types::{ChatOptions, ChatRequest, ChatResponse, Message, StepRecord};

/// Errors from a single chat call.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid step: {0}")]
    Decode(String),
}

/// Fixed decoding temperature for every call.
const TEMPERATURE: f32 = 0.2;

/// Raw HTTP client for the Ollama chat API.
#[derive(Debug)]
pub struct OllamaClient {
    http: Client,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    /// Create a client for the given endpoint (e.g. http://localhost:11434).
    pub fn new(endpoint: String, model: String) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            model,
        }
    }

    /// Send the conversation and decode one step from the reply.
    pub async fn chat(
        &self,
        messages: &[Message],
        max_tokens: u32,
    ) -> Result<StepRecord, LlmError> {
        let url = format!("{}/api/chat", self.endpoint);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            stream: false,
            format: "json".into(),
            options: ChatOptions {
                num_predict: max_tokens,
                temperature: TEMPERATURE,
            },
        };

        debug!(
            "POST {url}: {} messages, {max_tokens} max tokens",
            messages.len()
        );

        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_else(|_| "(no body)".into());
            return Err(LlmError::Api {
                status,
                message: body,
            });
        }

        let resp: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Decode(format!("failed to parse response body: {e}")))?;

        debug!("model replied: {}", resp.message.content);

        StepRecord::parse(&resp.message.content).map_err(LlmError::Decode)
    }
}
