use std::sync::Arc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::BotConfig,
    domain::{default_bot_commands, BotCommandDefinition, PlatformCommand},
    error::{AppError, Result},
    integrations::BotPlatform,
    repository::BotCommandRepository,
};

/// Update types the webhook subscribes to.
pub const WEBHOOK_UPDATES: &[&str] = &["message", "callback_query"];

#[derive(Debug, Clone, Serialize)]
pub struct CommandSyncReport {
    pub success: bool,
    pub synced: usize,
    pub failed: Vec<String>,
    pub commands: Vec<PlatformCommand>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookConfiguration {
    pub success: bool,
    pub webhook: String,
    pub result: Value,
    pub username: String,
}

/// Subset of a platform update the bot reacts to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: i64,
    pub message: Option<IncomingMessage>,
    pub callback_query: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub chat: Chat,
    pub from: Option<Sender>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    pub id: i64,
}

pub struct BotService {
    repo: Arc<dyn BotCommandRepository>,
    platform: Arc<dyn BotPlatform>,
    config: BotConfig,
    backend_url: String,
}

impl BotService {
    pub fn new(
        repo: Arc<dyn BotCommandRepository>,
        platform: Arc<dyn BotPlatform>,
        config: BotConfig,
        backend_url: String,
    ) -> Self {
        Self { repo, platform, config, backend_url }
    }

    fn configured_token(&self) -> Result<&str> {
        self.config
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Config("Bot token not configured".to_string()))
    }

    /// Upsert the built-in commands locally, then publish them to the platform
    /// in one call. Local failures are skipped; a platform failure is returned.
    pub async fn sync_commands(&self) -> Result<CommandSyncReport> {
        let token = self.configured_token()?;
        let definitions = default_bot_commands();

        let mut synced = 0;
        let mut failed = Vec::new();

        for definition in &definitions {
            match self.upsert_command(definition).await {
                Ok(_) => synced += 1,
                Err(e) => {
                    tracing::error!("Failed to sync command {}: {}", definition.command, e);
                    failed.push(definition.command.clone());
                }
            }
        }

        let commands: Vec<PlatformCommand> = definitions.iter().map(PlatformCommand::from).collect();
        self.platform.set_commands(token, &commands).await?;

        tracing::info!(
            "Registered {} commands with {} ({} stored locally, {} failed)",
            commands.len(),
            self.platform.name(),
            synced,
            failed.len()
        );

        Ok(CommandSyncReport {
            success: true,
            synced,
            failed,
            commands,
        })
    }

    async fn upsert_command(&self, definition: &BotCommandDefinition) -> Result<()> {
        match self.repo.find_by_command(&definition.command).await? {
            Some(existing) => {
                self.repo.update(existing.id, definition).await?;
            }
            None => {
                self.repo.create(definition).await?;
            }
        }
        Ok(())
    }

    /// Point the bot identified by `token` at this deployment's webhook.
    pub async fn configure_webhook(&self, token: Option<&str>) -> Result<WebhookConfiguration> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::InvalidInput("Bot token is required".to_string()))?;

        let identity = self.platform.get_me(token).await?;
        let webhook = webhook_url(&self.backend_url, &self.config.webhook_function)?;
        let result = self.platform.set_webhook(token, &webhook, WEBHOOK_UPDATES).await?;

        tracing::info!("Webhook for @{} set to {}", identity.username, webhook);

        Ok(WebhookConfiguration {
            success: true,
            webhook,
            result,
            username: identity.username,
        })
    }

    /// Answer a command message with its stored template. Anything else is ignored.
    pub async fn handle_update(&self, update: &Update) -> Result<()> {
        let Some(message) = &update.message else {
            if update.callback_query.is_some() {
                tracing::debug!("Ignoring callback query in update {}", update.update_id);
            }
            return Ok(());
        };

        let Some(name) = message.text.as_deref().and_then(parse_command) else {
            return Ok(());
        };

        let Some(command) = self.repo.find_by_command(&name).await? else {
            tracing::debug!("Unknown command {}", name);
            return Ok(());
        };

        if command.admin_only {
            let is_admin = message
                .from
                .as_ref()
                .map(|sender| self.config.admin_ids.contains(&sender.id))
                .unwrap_or(false);
            if !is_admin {
                tracing::info!("Rejected admin command {} from non-admin", name);
                return Ok(());
            }
        }

        let token = self.configured_token()?;
        self.platform
            .send_message(token, message.chat.id, &command.response_template)
            .await
    }
}

/// Build the webhook address from the deployment's base URL. The project id
/// is the first label of a host with at least three labels.
pub fn webhook_url(base_url: &str, function: &str) -> Result<String> {
    let url = reqwest::Url::parse(base_url)
        .map_err(|e| AppError::Config(format!("Invalid backend URL {}: {}", base_url, e)))?;

    let labels: Vec<&str> = url.domain().map(|d| d.split('.').collect()).unwrap_or_default();
    let project = match labels.as_slice() {
        [project, _, _, ..] if is_project_label(project) => *project,
        _ => {
            return Err(AppError::Config(format!(
                "Cannot determine project id from backend URL {}",
                base_url
            )))
        }
    };

    Ok(format!(
        "https://{}.functions.supabase.co/{}",
        project,
        function.trim_start_matches('/')
    ))
}

fn is_project_label(label: &str) -> bool {
    !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Extract `/command` from message text, dropping any `@botname` suffix.
pub fn parse_command(text: &str) -> Option<String> {
    let first = text.split_whitespace().next()?;
    if !first.starts_with('/') || first.len() == 1 {
        return None;
    }
    let name = first.split('@').next().unwrap_or(first);
    Some(name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_url_uses_project_label() {
        assert_eq!(
            webhook_url("https://abcd1234.supabase.co", "bot-webhook").unwrap(),
            "https://abcd1234.functions.supabase.co/bot-webhook"
        );
    }

    #[test]
    fn webhook_url_rejects_hosts_without_project() {
        assert!(matches!(
            webhook_url("http://localhost:54321", "bot-webhook"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            webhook_url("not a url", "bot-webhook"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            webhook_url("http://127.0.0.1:8080", "bot-webhook"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn parse_command_strips_bot_mention() {
        assert_eq!(parse_command("/Start@herald_bot hello"), Some("/start".to_string()));
        assert_eq!(parse_command("/help"), Some("/help".to_string()));
        assert_eq!(parse_command("hello /help"), None);
        assert_eq!(parse_command("/"), None);
        assert_eq!(parse_command(""), None);
    }
}
