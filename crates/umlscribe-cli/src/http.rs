//! Chat-completions client used as the CLI's [`Generator`].
//!
//! Talks to any OpenAI-compatible endpoint: `POST {base_url}/chat/completions`
//! with a bearer token, reading `choices[0].message.content` from the answer.

use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use umlscribe::{GenerationError, Generator, config::LlmConfig};

/// Chat message sent to the endpoint
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Request body for `/chat/completions`
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

/// Response body of `/chat/completions`, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking chat-completions client
#[derive(Debug)]
pub struct HttpGenerator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    system_prompt: Option<String>,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
}

impl HttpGenerator {
    /// Create a client for the endpoint described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Unconfigured`] when the base URL or model is
    /// empty, and [`GenerationError::Transport`] when the HTTP client cannot
    /// be built.
    pub fn new(config: &LlmConfig) -> Result<Self, GenerationError> {
        if config.base_url().trim().is_empty() {
            return Err(GenerationError::Unconfigured("llm.base_url is empty".to_string()));
        }
        if config.model().trim().is_empty() {
            return Err(GenerationError::Unconfigured("llm.model is empty".to_string()));
        }

        let client = Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .build()
            .map_err(|e| {
                warn!("Failed to build HTTP client: {:?}", e);
                GenerationError::Transport(e.to_string())
            })?;

        Ok(Self {
            client,
            endpoint: endpoint(config.base_url()),
            model: config.model().to_string(),
            api_key: config.api_key().map(str::to_string),
            system_prompt: config.system_prompt().map(str::to_string),
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
            timeout_secs: config.timeout_secs(),
        })
    }

    /// The URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            warn!(endpoint = self.endpoint, timeout_secs = self.timeout_secs; "Generation request timed out");
            GenerationError::Timeout(self.timeout_secs)
        } else {
            warn!(endpoint = self.endpoint; "Generation request failed: {:?}", err);
            GenerationError::Transport(err.to_string())
        }
    }
}

impl Generator for HttpGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            endpoint = self.endpoint,
            model = self.model,
            prompt_len = prompt.len();
            "Sending chat completion request"
        );

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().map_err(|e| self.request_error(e))?;
        let status = response.status();
        let text = response.text().map_err(|e| self.request_error(e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(); "Provider rejected generation request");
            return Err(GenerationError::Provider {
                status: status.as_u16(),
                body: text,
            });
        }

        let content = parse_completion(&text)?;
        debug!(length = content.len(); "Received chat completion");
        Ok(content)
    }
}

fn endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim().trim_end_matches('/'))
}

/// Extract the first choice's message content from a response body.
///
/// # Errors
///
/// Returns [`GenerationError::MalformedResponse`] when the body is not a
/// chat-completions response, and [`GenerationError::EmptyResponse`] when the
/// content is missing or blank.
pub fn parse_completion(body: &str) -> Result<String, GenerationError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::MalformedResponse("response has no choices".to_string()))?;

    match choice.message.and_then(|message| message.content) {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(GenerationError::EmptyResponse),
    }
}
