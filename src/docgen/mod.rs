//! Documentation generation
//!
//! Turns analysis output or git history into a prompt, asks the model, and
//! hands the text back for rendering. Calls are retried with a linear backoff.

pub mod changelog;
pub mod client;
pub mod pr;
pub mod prompts;
pub mod readme;

pub use changelog::generate_changelog;
pub use client::{available_models, ChatClient, ChatMessage, ChatRequest, GroqClient, FALLBACK_MODELS};
pub use pr::generate_pr_description;
pub use prompts::build_prompt;
pub use readme::generate_readme;

use crate::error::{ErrorSeverity, Result};
use crate::models::config::{DocConfig, DocKind};
use crate::output::reporter::Reporter;
use std::thread;
use std::time::Duration;

pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

/// Generates one document section per call
pub struct DocGenerator<'a, C: ChatClient> {
    client: C,
    config: &'a DocConfig,
    reporter: &'a dyn Reporter,
    retries: u32,
    backoff: Duration,
}

impl<'a, C: ChatClient> DocGenerator<'a, C> {
    pub fn new(client: C, config: &'a DocConfig, reporter: &'a dyn Reporter) -> Self {
        Self {
            client,
            config,
            reporter,
            retries: DEFAULT_RETRIES,
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Attempts per section, at least one
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries.max(1);
        self
    }

    /// Wait before attempt `n + 1` is `backoff × n`
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Ask the model for one section of a `kind` document about `context`
    pub fn generate_section(
        &self,
        context: &str,
        kind: DocKind,
        custom_instruction: Option<&str>,
    ) -> Result<String> {
        let request = ChatRequest {
            messages: vec![ChatMessage::user(build_prompt(kind, context, custom_instruction))],
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let mut attempt = 1;
        loop {
            match self.client.complete(&request) {
                Ok(content) => return Ok(content),
                Err(err) if attempt < self.retries && err.is_retryable() => {
                    tracing::debug!(attempt, error = %err, "chat completion failed");
                    self.reporter.report(
                        ErrorSeverity::Warning,
                        &format!("Attempt {}/{} failed, retrying...", attempt, self.retries),
                    );
                    thread::sleep(self.backoff * attempt);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
