//! Mock LLM client for testing.
//!
//! Plays back a scripted queue of responses and records every prompt it
//! receives, so tests can assert call counts, ordering, and prompt content
//! without a real API.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::{QuantbotError, Result};
use crate::llm::LlmClient;

/// A scripted step: either a canned response or an injected failure.
#[derive(Debug, Clone)]
enum Step {
    Respond(String),
    Fail(String),
}

/// Mock LLM client that returns scripted responses in order.
///
/// Once the script runs out, further calls return the last scripted
/// response again (deterministic replay for idempotence tests). An empty
/// script answers every prompt with a fixed placeholder.
#[derive(Debug, Default)]
pub struct MockLlmClient {
    script: Mutex<Vec<Step>>,
    cursor: Mutex<usize>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlmClient {
    /// Creates a new mock client with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends canned responses to the script.
    pub fn with_responses<I, S>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut script = self.script.lock().unwrap();
            script.extend(responses.into_iter().map(|r| Step::Respond(r.into())));
        }
        self
    }

    /// Appends a failure to the script; the call at this position errors.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script.lock().unwrap().push(Step::Fail(message.into()));
        self
    }

    /// Returns every prompt received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Returns the number of `complete` calls.
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let script = self.script.lock().unwrap();
        if script.is_empty() {
            return Ok("mock response".to_string());
        }

        let mut cursor = self.cursor.lock().unwrap();
        let index = (*cursor).min(script.len() - 1);
        *cursor += 1;

        match &script[index] {
            Step::Respond(text) => Ok(text.clone()),
            Step::Fail(message) => Err(QuantbotError::llm(message.clone())),
        }
    }
}
