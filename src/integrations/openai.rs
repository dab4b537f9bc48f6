use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    config::ProviderConfig,
    error::{AppError, Result},
    integrations::{ensure_success, TextGenerator},
};

/// Client for an OpenAI-compatible chat completions endpoint. Used as the
/// content classifier behind announcement validation.
pub struct OpenAiClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
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

impl OpenAiClient {
    pub fn new(http: reqwest::Client, config: ProviderConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        if self.config.api_key.is_empty() {
            return Err(AppError::Config("Validator API key not configured".to_string()));
        }

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: 0.1,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;
        let response = ensure_success(self.name(), response).await?;

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Upstream("Classifier returned no completion".to_string()))
    }
}
