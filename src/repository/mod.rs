use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::*;
use crate::error::Result;

pub mod announcement_repository;
pub mod bot_command_repository;

pub use announcement_repository::SqliteAnnouncementRepository;
pub use bot_command_repository::SqliteBotCommandRepository;

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn create(&self, announcement: Announcement) -> Result<Announcement>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>>;
    async fn list(&self, filter: &AnnouncementFilter, limit: i64, offset: i64) -> Result<Vec<Announcement>>;
    /// Writes title, content and status only while the stored row is editable
    /// (draft or validation failed). `None` when no editable row matched.
    async fn update(&self, id: Uuid, announcement: Announcement) -> Result<Option<Announcement>>;
    /// Moves a non-published row to pending validation. `None` when no such row.
    async fn mark_pending(&self, id: Uuid) -> Result<Option<Announcement>>;
    /// Records a verdict, provided the row is still pending with exactly the
    /// validated title and content. `None` otherwise.
    async fn complete_validation(&self, validated: &Announcement, status: AnnouncementStatus) -> Result<Option<Announcement>>;
    /// Deletes an editable row. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait BotCommandRepository: Send + Sync {
    async fn find_by_command(&self, command: &str) -> Result<Option<BotCommand>>;
    async fn create(&self, definition: &BotCommandDefinition) -> Result<BotCommand>;
    async fn update(&self, id: Uuid, definition: &BotCommandDefinition) -> Result<BotCommand>;
    async fn list(&self) -> Result<Vec<BotCommand>>;
}
