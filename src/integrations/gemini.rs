use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::ProviderConfig,
    error::{AppError, Result},
    integrations::{ensure_success, TextGenerator},
};

/// Client for the Gemini `generateContent` API, used to rewrite announcements.
pub struct GeminiClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, config: ProviderConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        if self.config.api_key.is_empty() {
            return Err(AppError::Config("Enhancer API key not configured".to_string()));
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await?;
        let response = ensure_success(self.name(), response).await?;

        let body: GenerateResponse = response.json().await?;
        body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
            .ok_or_else(|| AppError::Upstream("Generative model returned no text".to_string()))
    }
}
