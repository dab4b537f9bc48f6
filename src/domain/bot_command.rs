use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotCommand {
    pub id: Uuid,
    /// Command with its leading slash, e.g. `/start`. Unique.
    pub command: String,
    pub description: String,
    pub response_template: String,
    pub admin_only: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything about a command except its identity and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotCommandDefinition {
    pub command: String,
    pub description: String,
    pub response_template: String,
    pub admin_only: bool,
}

impl BotCommandDefinition {
    fn new(command: &str, description: &str, response_template: &str, admin_only: bool) -> Self {
        Self {
            command: command.to_string(),
            description: description.to_string(),
            response_template: response_template.to_string(),
            admin_only,
        }
    }

    /// The name the bot platform registers: no leading slash.
    pub fn platform_name(&self) -> &str {
        self.command.trim_start_matches('/')
    }
}

/// Entry of the platform's command registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCommand {
    pub command: String,
    pub description: String,
}

impl From<&BotCommandDefinition> for PlatformCommand {
    fn from(definition: &BotCommandDefinition) -> Self {
        Self {
            command: definition.platform_name().to_string(),
            description: definition.description.clone(),
        }
    }
}

pub fn default_bot_commands() -> Vec<BotCommandDefinition> {
    vec![
        BotCommandDefinition::new(
            "/start",
            "Start the bot and get a welcome message",
            "Welcome! I post the latest community announcements here. Send /help to see what I can do.",
            false,
        ),
        BotCommandDefinition::new(
            "/help",
            "Show the list of available commands",
            "Available commands:\n/announcements - recent announcements\n/latest - the newest announcement\n/status - bot status",
            false,
        ),
        BotCommandDefinition::new(
            "/announcements",
            "List recent announcements",
            "Recent announcements are listed on the dashboard. New ones are posted here as soon as they are published.",
            false,
        ),
        BotCommandDefinition::new(
            "/latest",
            "Show the most recent announcement",
            "The latest published announcement will appear here once it passes review.",
            false,
        ),
        BotCommandDefinition::new(
            "/status",
            "Check whether the bot is online",
            "The bot is online and listening for updates.",
            false,
        ),
        BotCommandDefinition::new(
            "/broadcast",
            "Broadcast a message to all subscribers (admins only)",
            "Broadcast queued. Subscribers will receive it shortly.",
            true,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_commands_are_unique_and_slash_prefixed() {
        let commands = default_bot_commands();
        assert_eq!(commands.len(), 6);

        let mut names: Vec<&str> = commands.iter().map(|c| c.command.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 6);
        assert!(commands.iter().all(|c| c.command.starts_with('/')));
    }

    #[test]
    fn platform_command_strips_prefix() {
        let commands = default_bot_commands();
        let entry = PlatformCommand::from(&commands[0]);
        assert_eq!(entry.command, "start");
        assert_eq!(entry.description, commands[0].description);
    }
}
