//! Configuration types for diagram generation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file. Every field is optional; missing fields take the defaults
//! documented on their getters.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`RepairConfig`] - Bounds and options of the repair loop.
//! - [`PromptConfig`] - How much request context goes into prompts.
//! - [`LlmConfig`] - Connection settings for a chat-completions endpoint.
//!
//! # Example
//!
//! ```
//! # use umlscribe::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.repair().max_attempts(), 2);
//! assert_eq!(config.prompt().transcript_limit(), 2000);
//! ```

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Repair loop section.
    #[serde(default)]
    repair: RepairConfig,

    /// Prompt section.
    #[serde(default)]
    prompt: PromptConfig,

    /// Model endpoint section.
    #[serde(default)]
    llm: LlmConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(repair: RepairConfig, prompt: PromptConfig, llm: LlmConfig) -> Self {
        Self {
            repair,
            prompt,
            llm,
        }
    }

    /// Returns the repair loop configuration.
    pub fn repair(&self) -> &RepairConfig {
        &self.repair
    }

    /// Returns the prompt configuration.
    pub fn prompt(&self) -> &PromptConfig {
        &self.prompt
    }

    /// Returns the model endpoint configuration.
    pub fn llm(&self) -> &LlmConfig {
        &self.llm
    }

    /// Returns a mutable reference to the model endpoint configuration.
    pub fn llm_mut(&mut self) -> &mut LlmConfig {
        &mut self.llm
    }
}

/// Bounds and options of the repair loop.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    max_attempts: usize,
    improvement_pass: bool,
    best_effort_on_exhaustion: bool,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            improvement_pass: false,
            best_effort_on_exhaustion: false,
        }
    }
}

impl RepairConfig {
    /// Creates a new [`RepairConfig`].
    ///
    /// # Arguments
    ///
    /// * `max_attempts` - Maximum number of repair calls per request.
    /// * `improvement_pass` - Whether already-valid output gets one improvement call.
    /// * `best_effort_on_exhaustion` - Whether an improved but invalid result is
    ///   returned instead of the fallback.
    pub fn new(max_attempts: usize, improvement_pass: bool, best_effort_on_exhaustion: bool) -> Self {
        Self {
            max_attempts,
            improvement_pass,
            best_effort_on_exhaustion,
        }
    }

    /// Maximum number of repair calls per request. Defaults to 2.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Whether valid initial output gets one improvement call. Defaults to `false`.
    pub fn improvement_pass(&self) -> bool {
        self.improvement_pass
    }

    /// Whether to return the best invalid output instead of the fallback when
    /// it improved on the initial output. Defaults to `false`.
    pub fn best_effort_on_exhaustion(&self) -> bool {
        self.best_effort_on_exhaustion
    }
}

/// Character limits for request context embedded in prompts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    transcript_limit: usize,
    summary_limit: usize,
    repair_transcript_limit: usize,
    repair_summary_limit: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            transcript_limit: 2000,
            summary_limit: 500,
            repair_transcript_limit: 800,
            repair_summary_limit: 400,
        }
    }
}

impl PromptConfig {
    /// Transcript characters in the initial prompt. Defaults to 2000.
    pub fn transcript_limit(&self) -> usize {
        self.transcript_limit
    }

    /// Summary characters in the initial prompt. Defaults to 500.
    pub fn summary_limit(&self) -> usize {
        self.summary_limit
    }

    /// Transcript characters in repair prompts. Defaults to 800.
    pub fn repair_transcript_limit(&self) -> usize {
        self.repair_transcript_limit
    }

    /// Summary characters in repair prompts. Defaults to 400.
    pub fn repair_summary_limit(&self) -> usize {
        self.repair_summary_limit
    }
}

/// Connection settings for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
    system_prompt: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434/v1".to_string(),
            model: "granite3.3:8b".to_string(),
            api_key: None,
            temperature: 0.0,
            max_tokens: 4000,
            timeout_secs: 60,
            system_prompt: None,
        }
    }
}

impl LlmConfig {
    /// Base URL of the endpoint, without the `/chat/completions` suffix.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Bearer token, if the endpoint needs one.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Sampling temperature. Defaults to 0.0.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Completion token limit. Defaults to 4000.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Per-call timeout in seconds. Defaults to 60.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Optional system message sent before every prompt.
    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    /// Set the bearer token.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }
}
