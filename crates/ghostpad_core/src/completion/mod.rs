//! Remote text completion: prompt shaping, provider calls and response cleanup.
//!
//! The provider itself sits behind [`CompletionClient`] so the scheduling and
//! lifecycle code never depends on a transport. [`request_completion`] is the
//! single entry point the rest of the app uses.

/// OpenAI-compatible HTTP transport.
pub mod http;
/// Context extraction, prompt text and response post-processing.
pub mod prompt;

pub use http::{CompletionEndpoint, HttpCompletionClient};
pub use prompt::{post_process, CompletionContext, CompletionPrompt, WordBoundary};

use thiserror::Error;

/// Failures on the completion path.
///
/// None of these are fatal; the controller folds them into user-visible
/// status text and keeps the editor usable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// No credential configured.
    #[error("No completion credential configured")]
    MissingCredential,

    /// Credential rejected by the provider (never includes key details).
    #[error("Completion provider rejected the credential")]
    Unauthorized,

    /// Provider throttling: HTTP 429, "too many requests" or quota exhaustion.
    #[error("Completion provider rate limit reached")]
    RateLimited,

    /// Transport failure (connect, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Any other provider failure.
    #[error("Completion request failed: {0}")]
    Request(String),
}

impl CompletionError {
    /// Classify a free-form provider message.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if looks_rate_limited(&message) {
            Self::RateLimited
        } else {
            Self::Request(message)
        }
    }

    /// True for provider throttling signals.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimited)
    }

    /// True for credential problems that disable the feature.
    pub fn is_initialization(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::Unauthorized)
    }
}

/// Whether a provider message signals throttling.
pub fn looks_rate_limited(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("429") || lower.contains("too many requests") || lower.contains("quota")
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network("request timed out".to_string())
        } else if err.is_connect() {
            Self::Network(err.to_string())
        } else if let Some(status) = err.status() {
            http::classify_failure(status.as_u16(), &err.to_string())
        } else {
            Self::from_message(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CompletionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Request(format!("invalid provider response: {}", err))
    }
}

/// A provider that turns a prompt into raw completion text.
///
/// Implementations block; callers run them off the UI thread.
pub trait CompletionClient: Send {
    /// Send one prompt and return the raw provider text.
    ///
    /// # Errors
    /// Returns a [`CompletionError`] for transport, credential or provider
    /// failures. Implementations must not retry.
    fn complete(&self, prompt: &CompletionPrompt) -> Result<String, CompletionError>;
}

/// Ask `client` for a completion of `text` at char offset `cursor`.
///
/// # Returns
/// - `Ok(None)` without calling the provider when fewer than 20 chars precede
///   the cursor.
/// - `Ok(None)` when the provider output is empty, runaway (over 100 chars) or
///   contains a blank line.
/// - `Ok(Some(text))` with a cleaned, insertable completion otherwise.
///
/// # Errors
/// Propagates the client's [`CompletionError`] unchanged.
pub fn request_completion(
    client: &dyn CompletionClient,
    text: &str,
    cursor: usize,
) -> Result<Option<String>, CompletionError> {
    let Some(context) = CompletionContext::new(text, cursor) else {
        return Ok(None);
    };
    let prompt = context.prompt();
    let raw = client.complete(&prompt)?;
    Ok(post_process(&raw, &context))
}
