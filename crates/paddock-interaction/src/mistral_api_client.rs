//! MistralApiClient - direct REST implementation for the Mistral
//! chat-completions API.
//!
//! Configuration comes from environment variables (`MISTRAL_API_KEY`,
//! `MISTRAL_MODEL`, `MISTRAL_BASE_URL`). A missing credential is not an
//! error condition for the engine; callers treat it as "no remote model".

use crate::generator::{ModelError, TextModel};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const DEFAULT_MISTRAL_MODEL: &str = "mistral-large-latest";
const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";

/// Single-attempt bound for the blocking request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_MAX_TOKENS: u32 = 100;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TOP_P: f32 = 0.8;

/// Client that talks to the Mistral chat-completions HTTP API.
#[derive(Clone)]
pub struct MistralApiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

impl MistralApiClient {
    /// Creates a new client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// `MISTRAL_API_KEY` is required; `MISTRAL_MODEL` defaults to
    /// `mistral-large-latest` and `MISTRAL_BASE_URL` to the public
    /// endpoint.
    pub fn try_from_env() -> Result<Self, ModelError> {
        let api_key = env::var("MISTRAL_API_KEY").map_err(|_| {
            ModelError::Configuration("MISTRAL_API_KEY not found in environment".into())
        })?;

        let model = env::var("MISTRAL_MODEL").unwrap_or_else(|_| DEFAULT_MISTRAL_MODEL.into());
        let mut client = Self::new(api_key, model);
        if let Ok(base_url) = env::var("MISTRAL_BASE_URL") {
            client.base_url = base_url;
        }
        Ok(client)
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the endpoint base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }

    fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, ModelError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(url)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .map_err(|err| ModelError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .map_err(|err| ModelError::Malformed(err.to_string()))?;

        extract_text_response(parsed)
    }
}

impl TextModel for MistralApiClient {
    fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let request = self.build_request(prompt);
        self.send_request(&request)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, ModelError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| ModelError::Malformed("no content in response choices".into()))
}

fn map_http_error(status: StatusCode, body: String) -> ModelError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.message)
        .unwrap_or(body);

    ModelError::Status {
        status: status.as_u16(),
        message,
    }
}
