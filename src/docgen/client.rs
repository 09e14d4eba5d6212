//! Chat completion client for the Groq API (OpenAI-compatible)

use crate::error::{LazydocsError, Result};
use crate::output::reporter::Reporter;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Offered when the model list cannot be fetched
pub const FALLBACK_MODELS: &[&str] = &[
    "llama-3.3-70b-versatile",
    "llama-3.1-8b-instant",
    "openai/gpt-oss-120b",
    "openai/gpt-oss-20b",
    "meta-llama/llama-guard-4-12b",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One chat completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Anything that can answer a chat request with text
pub trait ChatClient {
    fn complete(&self, request: &ChatRequest) -> Result<String>;
}

impl<C: ChatClient + ?Sized> ChatClient for &C {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        (**self).complete(request)
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
    active: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    code: Option<String>,
}

/// Blocking Groq client
pub struct GroqClient {
    agent: ureq::Agent,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn authorization(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Ids of the active models, sorted
    pub fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &self.authorization())
            .call()
            .map_err(map_ureq_error)?;

        let list: ModelList = response
            .into_json()
            .map_err(|e| network_error(format!("invalid model list: {}", e)))?;

        let mut models: Vec<String> = list
            .data
            .into_iter()
            .filter(|model| model.active != Some(false))
            .map(|model| model.id)
            .collect();
        models.sort();
        Ok(models)
    }
}

impl ChatClient for GroqClient {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(model = %request.model, url = %url, "sending chat completion");

        let response = self
            .agent
            .post(&url)
            .set("Authorization", &self.authorization())
            .set("Content-Type", "application/json")
            .send_json(request)
            .map_err(map_ureq_error)?;

        let body: ChatResponse = response
            .into_json()
            .map_err(|e| network_error(format!("invalid completion response: {}", e)))?;
        first_choice_content(body)
    }
}

/// The live model list, or [`FALLBACK_MODELS`] with a warning when it cannot be fetched
pub fn available_models(client: Option<&GroqClient>, reporter: &dyn Reporter) -> Vec<String> {
    let fallback = || FALLBACK_MODELS.iter().map(|m| m.to_string()).collect();
    let Some(client) = client else {
        return fallback();
    };

    match client.list_models() {
        Ok(models) if !models.is_empty() => models,
        Ok(_) => fallback(),
        Err(err) => {
            tracing::debug!(error = %err, "model list request failed");
            reporter.report(
                crate::error::ErrorSeverity::Warning,
                "Failed to fetch models from API, using fallback list",
            );
            fallback()
        }
    }
}

fn first_choice_content(body: ChatResponse) -> Result<String> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(LazydocsError::EmptyCompletion)
}

fn map_ureq_error(err: ureq::Error) -> LazydocsError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            error_for_status(status, &body)
        }
        ureq::Error::Transport(transport) => network_error(transport.to_string()),
    }
}

fn network_error(message: String) -> LazydocsError {
    LazydocsError::Network { message }
}

/// Map a non-success response to an error, preferring the API's error code
pub(crate) fn error_for_status(status: u16, body: &str) -> LazydocsError {
    let parsed = serde_json::from_str::<ErrorResponse>(body).ok();

    if let Some(code) = parsed.as_ref().and_then(|r| r.error.code.as_deref()) {
        match code {
            "invalid_api_key" => return LazydocsError::Unauthorized,
            "rate_limit_exceeded" => return LazydocsError::RateLimited,
            "request_too_large" => return LazydocsError::PayloadTooLarge,
            _ => {}
        }
    }

    match status {
        401 => LazydocsError::Unauthorized,
        413 => LazydocsError::PayloadTooLarge,
        429 => LazydocsError::RateLimited,
        _ => LazydocsError::Api {
            status,
            message: parsed
                .map(|r| r.error.message)
                .unwrap_or_else(|| body.trim().to_string()),
        },
    }
}
