//! Reasoning chain — the three-pass protocol driving the model.
//!
//! A first pass reasons until the model calls for the final answer, a
//! capped second pass re-examines that reasoning, and one last call
//! produces the answer itself. Every completed step is pushed to the
//! consumer as a full snapshot; the last push carries the total
//! thinking time.

pub mod prompts;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

use crate::llm::types::{Message, NextAction, StepRecord};
use crate::llm::StepFetcher;

/// Token budget for every model call.
const STEP_MAX_TOKENS: u32 = 512;

/// Hard ceiling on recorded second-pass steps.
const SECOND_PASS_CAP: usize = 10;

/// One rendered reasoning step: display label, body, and the wall-clock
/// seconds its round-trip took (retry pauses included).
#[derive(Debug, Clone)]
pub struct TimedStep {
    pub label: String,
    pub content: String,
    pub seconds: f64,
}

/// Snapshot pushed to the consumer after each completed step.
///
/// `steps` is always the full accumulated sequence; `total_seconds` is
/// present only on the last update of a run.
#[derive(Debug, Clone)]
pub struct ChainUpdate {
    pub steps: Vec<TimedStep>,
    pub total_seconds: Option<f64>,
}

/// Which phase of the protocol a step belongs to. Decides the step's
/// display label and the fallback wording on fetch exhaustion.
enum Pass {
    First(usize),
    Second(usize),
    Final,
}

impl Pass {
    fn label(&self, title: &str) -> String {
        match self {
            Pass::First(n) => format!("Step {n}: {title}"),
            Pass::Second(n) => format!("Second Pass Step {n}: {title}"),
            Pass::Final => "Final Answer".into(),
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Pass::Final)
    }
}

/// Per-query mutable state: the growing conversation, the recorded
/// steps, and the running time total. Built fresh for each query and
/// discarded after the last update.
struct ChainState {
    messages: Vec<Message>,
    steps: Vec<TimedStep>,
    total_seconds: f64,
}

impl ChainState {
    fn new(query: &str) -> Self {
        Self {
            messages: prompts::seed_conversation(query),
            steps: Vec::new(),
            total_seconds: 0.0,
        }
    }

    async fn push(
        &self,
        updates: &mpsc::Sender<ChainUpdate>,
        total_seconds: Option<f64>,
    ) -> Result<(), mpsc::error::SendError<ChainUpdate>> {
        updates
            .send(ChainUpdate {
                steps: self.steps.clone(),
                total_seconds,
            })
            .await
    }
}

/// Drives one query through the three-pass protocol.
pub struct ReasoningChain {
    fetcher: StepFetcher,
}

impl ReasoningChain {
    pub fn new(fetcher: StepFetcher) -> Self {
        Self { fetcher }
    }

    /// Run the full chain for one query, pushing an update after every
    /// step. Returns early if the consumer hangs up.
    pub async fn run(&self, query: &str, updates: mpsc::Sender<ChainUpdate>) {
        let mut state = ChainState::new(query);

        // First pass: reason until the model calls for the final answer.
        // Deliberately uncapped.
        let mut n = 1;
        loop {
            let record = self.advance(&mut state, Pass::First(n)).await;
            if state.push(&updates, None).await.is_err() {
                return;
            }
            if record.next_action == NextAction::FinalAnswer {
                break;
            }
            n += 1;
        }
        debug!("first pass complete: {n} steps");

        // Second pass: re-examine the reasoning, hard-capped.
        state
            .messages
            .push(Message::user(prompts::SECOND_PASS_PROMPT));
        let mut n = 1;
        loop {
            let record = self.advance(&mut state, Pass::Second(n)).await;
            if state.push(&updates, None).await.is_err() {
                return;
            }
            if record.next_action == NextAction::FinalAnswer || n >= SECOND_PASS_CAP {
                break;
            }
            n += 1;
        }
        debug!("second pass complete: {n} steps");

        // Final answer: one call, then the terminal update with the total.
        state
            .messages
            .push(Message::user(prompts::FINAL_ANSWER_PROMPT));
        self.advance(&mut state, Pass::Final).await;
        let total = state.total_seconds;
        if state.push(&updates, Some(total)).await.is_err() {
            return;
        }
        debug!("chain complete: {} steps in {total:.2}s", state.steps.len());
    }

    /// Fetch one step, time it, and fold it into the state: the record
    /// joins the conversation as an assistant turn and the step list
    /// under its pass label.
    async fn advance(&self, state: &mut ChainState, pass: Pass) -> StepRecord {
        let started = Instant::now();
        let record = self
            .fetcher
            .fetch_step(&state.messages, STEP_MAX_TOKENS, pass.is_final())
            .await;
        let seconds = started.elapsed().as_secs_f64();
        state.total_seconds += seconds;

        state.messages.push(Message::assistant(record.to_json()));
        state.steps.push(TimedStep {
            label: pass.label(&record.title),
            content: record.content.clone(),
            seconds,
        });
        record
    }
}
