use std::sync::Arc;

use crate::{
    domain::{ContentRequest, EnhancementResult},
    error::{AppError, Result},
    integrations::{extract_json_object, TextGenerator},
};

pub struct EnhancementService {
    generator: Arc<dyn TextGenerator>,
}

impl EnhancementService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Have the generative model rewrite an announcement. Unlike validation
    /// there is no fallback: an unreadable answer is an upstream failure.
    pub async fn enhance(&self, request: &ContentRequest) -> Result<EnhancementResult> {
        let (title, content) = request.require()?;

        let text = self.generator.generate(&build_prompt(title, content)).await?;
        let result = parse_enhancement(&text)?;

        tracing::debug!(
            "{} suggested {} improvements",
            self.generator.name(),
            result.improvements.len()
        );

        Ok(result)
    }
}

fn build_prompt(title: &str, content: &str) -> String {
    format!(
        "You are an editor improving announcements for a community.\n\
         Rewrite the announcement below so it is clear, engaging and professional. \
         Keep the original meaning and facts, fix grammar and spelling, and keep it concise.\n\n\
         Title: {title}\n\
         Content: {content}\n\n\
         Respond with a single JSON object and nothing else:\n\
         {{\"enhancedTitle\": \"improved title\", \"enhancedContent\": \"improved content\", \
         \"improvements\": [\"each specific change you made\"]}}"
    )
}

pub fn parse_enhancement(text: &str) -> Result<EnhancementResult> {
    let json = extract_json_object(text).ok_or_else(|| {
        AppError::Upstream("Generative model response contains no JSON object".to_string())
    })?;

    serde_json::from_str(json)
        .map_err(|e| AppError::Upstream(format!("Invalid enhancement response: {}", e)))
}
