use async_trait::async_trait;
use serde_json::Value;
use crate::domain::{BucketSpec, PlatformCommand};
use crate::error::{AppError, Result};

pub mod gemini;
pub mod openai;
pub mod storage;
pub mod telegram;

/// A hosted model that turns a prompt into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct BotIdentity {
    pub id: i64,
    pub username: String,
}

/// The chat bot platform. Every call names the bot token explicitly since the
/// webhook configuration endpoint works with tokens supplied by the caller.
#[async_trait]
pub trait BotPlatform: Send + Sync {
    fn name(&self) -> &str;
    async fn get_me(&self, token: &str) -> Result<BotIdentity>;
    async fn set_webhook(&self, token: &str, url: &str, allowed_updates: &[&str]) -> Result<Value>;
    async fn set_commands(&self, token: &str, commands: &[PlatformCommand]) -> Result<()>;
    async fn send_message(&self, token: &str, chat_id: i64, text: &str) -> Result<()>;
}

/// Bucket administration on the hosted object store.
#[async_trait]
pub trait StorageAdmin: Send + Sync {
    fn name(&self) -> &str;
    async fn list_buckets(&self) -> Result<Vec<String>>;
    async fn create_bucket(&self, spec: &BucketSpec) -> Result<()>;
}

/// Turn a non-success HTTP response into an upstream error carrying the body.
pub(crate) async fn ensure_success(service: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::Upstream(format!("{} returned {}: {}", service, status, body)))
}

/// Slice from the first `{` to the last `}` of `text`, if there is one.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_wrapped_in_prose() {
        let text = "Sure! Here is the result:\n```json\n{\"isValid\": true, \"nested\": {\"a\": 1}}\n```";
        assert_eq!(
            extract_json_object(text),
            Some("{\"isValid\": true, \"nested\": {\"a\": 1}}")
        );
    }

    #[test]
    fn no_object_when_braces_missing_or_reversed() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
        assert_eq!(extract_json_object("only an opening {"), None);
    }
}
