//! Step fetching — the resilience layer between the chain and the wire.
//!
//! Wraps a transport behind `StepTransport` so the chain above never sees
//! an error: three attempts per step, a fixed pause between them, and a
//! synthesized fallback step once they are spent.

pub mod client;
pub mod types;

use std::time::Duration;

use tracing::warn;

use client::{LlmError, OllamaClient};
use types::{Message, NextAction, StepRecord};

/// Attempts per step before giving up.
const FETCH_ATTEMPTS: u32 = 3;

/// Pause between failed attempts. Fixed, no backoff.
const RETRY_PAUSE: Duration = Duration::from_secs(1);

/// One round-trip to the model: a conversation in, a step out.
#[async_trait::async_trait]
pub trait StepTransport: Send + Sync {
    async fn request_step(
        &self,
        messages: &[Message],
        max_tokens: u32,
    ) -> Result<StepRecord, LlmError>;
}

#[async_trait::async_trait]
impl StepTransport for OllamaClient {
    async fn request_step(
        &self,
        messages: &[Message],
        max_tokens: u32,
    ) -> Result<StepRecord, LlmError> {
        self.chat(messages, max_tokens).await
    }
}

/// Fetches steps with retry and terminal degradation.
///
/// `fetch_step` cannot fail: after `FETCH_ATTEMPTS` failed calls it
/// synthesizes an error step so the chain keeps its shape. Transport and
/// decode failures count the same.
pub struct StepFetcher {
    transport: Box<dyn StepTransport>,
}

impl StepFetcher {
    pub fn new(transport: Box<dyn StepTransport>) -> Self {
        Self { transport }
    }

    /// Fetch one step, retrying on any failure.
    ///
    /// `is_final` only changes the fallback wording; the request itself is
    /// the same for every step.
    pub async fn fetch_step(
        &self,
        messages: &[Message],
        max_tokens: u32,
        is_final: bool,
    ) -> StepRecord {
        let mut last_error = String::new();

        for attempt in 0..FETCH_ATTEMPTS {
            match self.transport.request_step(messages, max_tokens).await {
                Ok(step) => return step,
                Err(e) => {
                    warn!("step attempt {} failed: {e}", attempt + 1);
                    last_error = e.to_string();
                }
            }
            if attempt + 1 < FETCH_ATTEMPTS {
                tokio::time::sleep(RETRY_PAUSE).await;
            }
        }

        fallback_step(&last_error, is_final)
    }
}

/// The step that stands in when every attempt failed.
fn fallback_step(last_error: &str, is_final: bool) -> StepRecord {
    let content = if is_final {
        format!("Failed to generate final answer after {FETCH_ATTEMPTS} attempts. Error: {last_error}")
    } else {
        format!("Failed to generate step after {FETCH_ATTEMPTS} attempts. Error: {last_error}")
    };
    StepRecord {
        title: "Error".into(),
        content,
        confidence: None,
        // Terminates the pass instead of looping on a dead transport.
        next_action: NextAction::FinalAnswer,
    }
}
