use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    domain::PlatformCommand,
    error::{AppError, Result},
    integrations::{BotIdentity, BotPlatform},
};

/// Telegram Bot API client.
pub struct TelegramClient {
    http: reqwest::Client,
    api_base_url: String,
}

/// Envelope every Bot API method answers with.
#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct User {
    id: i64,
    username: Option<String>,
}

impl TelegramClient {
    pub fn new(http: reqwest::Client, api_base_url: impl Into<String>) -> Self {
        Self {
            http,
            api_base_url: api_base_url.into(),
        }
    }

    async fn call<B, T>(&self, token: &str, method: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = format!(
            "{}/bot{}/{}",
            self.api_base_url.trim_end_matches('/'),
            token,
            method
        );

        // The Bot API reports failures in the envelope, often with a 4xx status,
        // so the body is decoded regardless of the status code.
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let envelope: ApiResponse<T> = response.json().await.map_err(|e| {
            AppError::Upstream(format!("Telegram {} returned {} with unreadable body: {}", method, status, e))
        })?;

        if !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(AppError::Upstream(format!("Telegram {} failed: {}", method, description)));
        }

        envelope
            .result
            .ok_or_else(|| AppError::Upstream(format!("Telegram {} returned no result", method)))
    }
}

#[async_trait]
impl BotPlatform for TelegramClient {
    fn name(&self) -> &str {
        "Telegram"
    }

    async fn get_me(&self, token: &str) -> Result<BotIdentity> {
        let user: User = self.call(token, "getMe", &json!({})).await?;
        Ok(BotIdentity {
            id: user.id,
            username: user.username.unwrap_or_default(),
        })
    }

    async fn set_webhook(&self, token: &str, url: &str, allowed_updates: &[&str]) -> Result<Value> {
        self.call(
            token,
            "setWebhook",
            &json!({
                "url": url,
                "allowed_updates": allowed_updates,
            }),
        )
        .await
    }

    async fn set_commands(&self, token: &str, commands: &[PlatformCommand]) -> Result<()> {
        let _: Value = self
            .call(token, "setMyCommands", &json!({ "commands": commands }))
            .await?;
        Ok(())
    }

    async fn send_message(&self, token: &str, chat_id: i64, text: &str) -> Result<()> {
        let _: Value = self
            .call(
                token,
                "sendMessage",
                &json!({
                    "chat_id": chat_id,
                    "text": text,
                }),
            )
            .await?;
        Ok(())
    }
}
