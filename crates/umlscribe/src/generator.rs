//! The text generation contract.
//!
//! A [`Generator`] turns a prompt into raw model output. The library never
//! talks to a model itself; callers inject a generator, typically an HTTP
//! client, or a closure in tests.

use thiserror::Error;

/// A prompt-to-text generation function.
///
/// Implemented for every `Fn(&str) -> Result<String, GenerationError>`.
///
/// # Examples
///
/// ```
/// # use umlscribe::{Generator, GenerationError};
/// let echo = |prompt: &str| -> Result<String, GenerationError> { Ok(prompt.to_uppercase()) };
/// assert_eq!(echo.generate("hi").unwrap(), "HI");
/// ```
pub trait Generator {
    /// Generate a completion for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] describing why no text was produced.
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

impl<F> Generator for F
where
    F: Fn(&str) -> Result<String, GenerationError>,
{
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self(prompt)
    }
}

/// Classified generation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The call did not complete within the configured time.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The endpoint could not be reached.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Provider { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The response carried no text.
    #[error("empty response")]
    EmptyResponse,

    /// The generator is missing required settings.
    #[error("generator is not configured: {0}")]
    Unconfigured(String),
}

impl GenerationError {
    /// Short label for status messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Transport(_) => "transport",
            Self::Provider { .. } => "provider",
            Self::MalformedResponse(_) => "malformed response",
            Self::EmptyResponse => "empty response",
            Self::Unconfigured(_) => "unconfigured",
        }
    }
}
