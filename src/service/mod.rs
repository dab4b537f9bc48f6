pub mod announcement_service;
pub mod bot_service;
pub mod enhancement_service;
pub mod storage_service;
pub mod validation_service;

use std::sync::Arc;
use sqlx::SqlitePool;
use crate::config::Settings;
use crate::integrations::{BotPlatform, StorageAdmin, TextGenerator};
use crate::repository::*;
use announcement_service::AnnouncementService;
use bot_service::BotService;
use enhancement_service::EnhancementService;
use storage_service::StorageService;
use validation_service::ValidationService;

/// External services the application talks to.
pub struct Integrations {
    pub classifier: Arc<dyn TextGenerator>,
    pub generator: Arc<dyn TextGenerator>,
    pub bot_platform: Arc<dyn BotPlatform>,
    pub storage: Arc<dyn StorageAdmin>,
}

pub struct ServiceContext {
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
    pub bot_command_repo: Arc<dyn BotCommandRepository>,
    pub announcement_service: Arc<AnnouncementService>,
    pub validation_service: Arc<ValidationService>,
    pub enhancement_service: Arc<EnhancementService>,
    pub bot_service: Arc<BotService>,
    pub storage_service: Arc<StorageService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(db_pool: SqlitePool, integrations: Integrations, settings: &Settings) -> Self {
        let announcement_repo: Arc<dyn AnnouncementRepository> =
            Arc::new(SqliteAnnouncementRepository::new(db_pool.clone()));
        let bot_command_repo: Arc<dyn BotCommandRepository> =
            Arc::new(SqliteBotCommandRepository::new(db_pool.clone()));

        let validation_service = Arc::new(ValidationService::new(integrations.classifier));
        let enhancement_service = Arc::new(EnhancementService::new(integrations.generator));
        let announcement_service = Arc::new(AnnouncementService::new(
            announcement_repo.clone(),
            validation_service.clone(),
        ));
        let bot_service = Arc::new(BotService::new(
            bot_command_repo.clone(),
            integrations.bot_platform,
            settings.bot.clone(),
            settings.backend.url.clone(),
        ));
        let storage_service = Arc::new(StorageService::new(integrations.storage));

        Self {
            announcement_repo,
            bot_command_repo,
            announcement_service,
            validation_service,
            enhancement_service,
            bot_service,
            storage_service,
            db_pool,
        }
    }
}

impl Integrations {
    /// Production clients built from configuration, sharing one HTTP client.
    pub fn from_settings(settings: &Settings) -> Self {
        use crate::integrations::{
            gemini::GeminiClient, openai::OpenAiClient, storage::StorageClient, telegram::TelegramClient,
        };

        let http = reqwest::Client::new();
        Self {
            classifier: Arc::new(OpenAiClient::new(http.clone(), settings.ai.validator.clone())),
            generator: Arc::new(GeminiClient::new(http.clone(), settings.ai.enhancer.clone())),
            bot_platform: Arc::new(TelegramClient::new(http.clone(), settings.bot.api_base_url.clone())),
            storage: Arc::new(StorageClient::new(http, settings.backend.clone())),
        }
    }
}
