//! Document-grounded question answering.
//!
//! The relay owns the extracted document text and an LLM client. Each question
//! is wrapped in an intent-matching prompt and the model's answer is relayed
//! back, or classified as one of the [`AnswerError`] outcomes.

use tracing::{debug, warn};

use crate::doc_processor::DocumentContext;
use crate::llm::{GeminiClient, GenerateRequest, LlmError};

pub const DEFAULT_TEMPERATURE: f32 = 0.2;

const INSTRUCTIONS: &str = "You are a helpful assistant that answers questions based on the provided PDF content. \
The PDF contains multiple intents, each with training phrases (TP) and answers (AS). \
Your task is to match the user's question to the most relevant intent by comparing it to the training phrases. \
If a match is found, rephrase the corresponding answer (AS) in a natural, conversational tone while keeping the core information intact. \
Do not add extra details or deviate from the original meaning. \
If no match is found, return an empty response (no text). \
Be strict about matching intents and do not respond to unrelated questions.";

#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    /// The model matched no intent, or returned no text.
    #[error("no relevant answer found")]
    NoMatch,
    #[error("upstream request failed")]
    Upstream(#[source] LlmError),
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

impl From<LlmError> for AnswerError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(msg) => AnswerError::Malformed(msg),
            other => AnswerError::Upstream(other),
        }
    }
}

/// Build the intent-matching prompt for one user message.
pub fn build_prompt(context: &str, user_message: &str) -> String {
    format!("{INSTRUCTIONS}\n\nPDF Content:\n{context}\n\nUser Question: {user_message}")
}

pub struct ChatRelay {
    context: DocumentContext,
    client: GeminiClient,
    temperature: f32,
}

impl ChatRelay {
    pub fn new(context: DocumentContext, client: GeminiClient) -> Self {
        Self {
            context,
            client,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn context(&self) -> &DocumentContext {
        &self.context
    }

    /// Answer a user question from the document context.
    pub async fn answer(&self, user_message: &str) -> Result<String, AnswerError> {
        let request = GenerateRequest {
            prompt: build_prompt(self.context.as_str(), user_message),
            temperature: self.temperature,
        };

        let text = match self.client.generate(&request).await {
            Ok(text) => text,
            Err(e) => {
                let err = AnswerError::from(e);
                match &err {
                    AnswerError::Malformed(msg) => {
                        warn!(error = %msg, "invalid API response format")
                    }
                    AnswerError::Upstream(source) => warn!(error = %source, "API request failed"),
                    AnswerError::NoMatch => {}
                }
                return Err(err);
            }
        };

        match text.as_deref().map(str::trim) {
            Some(answer) if !answer.is_empty() => Ok(answer.to_string()),
            _ => {
                debug!("no intent matched");
                Err(AnswerError::NoMatch)
            }
        }
    }
}
