//! Prompt constants for the reasoning chain.
//!
//! The system prompt pins the JSON step contract; the pass prompts are the
//! fixed user turns that open the second pass and the final answer.

use crate::llm::types::Message;

/// System prompt establishing the step-by-step JSON contract.
pub const SYSTEM_PROMPT: &str = r#"You are an expert AI assistant that explains your reasoning step by step. For each step, provide a title that describes what you're doing in that step, along with the content. Decide if you need another step or if you're ready to give the final answer. Respond in JSON format with 'title', 'content', and 'next_action' (either 'continue' or 'final_answer') keys. You may also include a 'confidence' key (0-100) quantifying how certain you are of the step. USE AS MANY REASONING STEPS AS POSSIBLE. AT LEAST 3. BE AWARE OF YOUR LIMITATIONS AS AN LLM AND WHAT YOU CAN AND CANNOT DO. IN YOUR REASONING, INCLUDE EXPLORATION OF ALTERNATIVE ANSWERS. CONSIDER YOU MAY BE WRONG, AND IF YOU ARE WRONG IN YOUR REASONING, WHERE IT WOULD BE. FULLY TEST ALL OTHER POSSIBILITIES. YOU CAN BE WRONG. WHEN YOU SAY YOU ARE RE-EXAMINING, ACTUALLY RE-EXAMINE, AND USE ANOTHER APPROACH TO DO SO. DO NOT JUST SAY YOU ARE RE-EXAMINING. USE AT LEAST 3 METHODS TO DERIVE THE ANSWER. USE BEST PRACTICES.

Example of a valid JSON response:
```json
{
    "title": "Identifying Key Information",
    "content": "To begin solving this problem, we need to carefully examine the given information and identify the crucial elements that will guide our solution process. This involves...",
    "confidence": 90,
    "next_action": "continue"
}```
You MUST respond using the expected JSON schema, and your response must be valid JSON. This JSON response is essential for our job."#;

/// Scripted assistant turn that primes the model into step one.
pub const ACK_MESSAGE: &str = "Thank you! I will now think step by step following my instructions, starting at the beginning after decomposing the problem.";

/// User turn that opens the self-critique pass.
pub const SECOND_PASS_PROMPT: &str = "Please re-examine your reasoning. Identify any weak points or alternative solutions you may have missed.";

/// User turn that requests the final answer.
pub const FINAL_ANSWER_PROMPT: &str =
    "Please provide the final answer based on your reasoning above.";

/// Seed conversation for a new query: contract, query, acknowledgment.
pub fn seed_conversation(query: &str) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(query),
        Message::assistant(ACK_MESSAGE),
    ]
}
