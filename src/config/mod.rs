use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// The hosted project this deployment belongs to. Its base URL also names
/// the project used to build the bot webhook address.
#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub url: String,
    #[serde(default)]
    pub service_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    #[serde(default = "ProviderConfig::default_validator")]
    pub validator: ProviderConfig,
    #[serde(default = "ProviderConfig::default_enhancer")]
    pub enhancer: ProviderConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            validator: ProviderConfig::default_validator(),
            enhancer: ProviderConfig::default_enhancer(),
        }
    }
}

impl ProviderConfig {
    fn default_validator() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }

    fn default_enhancer() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    pub token: Option<String>,
    #[serde(default = "BotConfig::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "BotConfig::default_webhook_function")]
    pub webhook_function: String,
    /// Platform user ids allowed to run admin-only commands.
    #[serde(default)]
    pub admin_ids: Vec<i64>,
}

impl BotConfig {
    fn default_api_base_url() -> String {
        "https://api.telegram.org".to_string()
    }

    fn default_webhook_function() -> String {
        "bot-webhook".to_string()
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base_url: Self::default_api_base_url(),
            webhook_function: Self::default_webhook_function(),
            admin_ids: Vec::new(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite://herald.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("backend.url", "http://localhost:54321")?
            .set_default("ai.validator.base_url", "https://api.openai.com/v1")?
            .set_default("ai.validator.model", "gpt-4o-mini")?
            .set_default("ai.enhancer.base_url", "https://generativelanguage.googleapis.com")?
            .set_default("ai.enhancer.model", "gemini-1.5-flash")?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with HERALD__ prefix, double underscore separates levels)
            .add_source(
                Environment::with_prefix("HERALD")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("bot.admin_ids")
                    .try_parsing(true),
            )

            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "sqlite://herald.db?mode=rwc".to_string(),
                max_connections: 10,
            },
            backend: BackendConfig {
                url: "http://localhost:54321".to_string(),
                service_key: String::new(),
            },
            ai: AiConfig::default(),
            bot: BotConfig::default(),
        }
    }
}
