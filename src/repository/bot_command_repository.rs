use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{BotCommand, BotCommandDefinition},
    error::{AppError, Result},
    repository::BotCommandRepository,
};

#[derive(FromRow)]
struct BotCommandRow {
    id: String,
    command: String,
    description: String,
    response_template: String,
    admin_only: i32,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteBotCommandRepository {
    pool: SqlitePool,
}

impl SqliteBotCommandRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_command(row: BotCommandRow) -> Result<BotCommand> {
        Ok(BotCommand {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            command: row.command,
            description: row.description,
            response_template: row.response_template,
            admin_only: row.admin_only != 0,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BotCommand>> {
        let row = sqlx::query_as::<_, BotCommandRow>(
            r#"
            SELECT id, command, description, response_template, admin_only, created_at, updated_at
            FROM bot_commands
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_command).transpose()
    }
}

#[async_trait]
impl BotCommandRepository for SqliteBotCommandRepository {
    async fn find_by_command(&self, command: &str) -> Result<Option<BotCommand>> {
        let row = sqlx::query_as::<_, BotCommandRow>(
            r#"
            SELECT id, command, description, response_template, admin_only, created_at, updated_at
            FROM bot_commands
            WHERE command = ?
            "#,
        )
        .bind(command)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_command).transpose()
    }

    async fn create(&self, definition: &BotCommandDefinition) -> Result<BotCommand> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO bot_commands (
                id, command, description, response_template, admin_only, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&definition.command)
        .bind(&definition.description)
        .bind(&definition.response_template)
        .bind(definition.admin_only as i32)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created bot command".to_string()))
    }

    async fn update(&self, id: Uuid, definition: &BotCommandDefinition) -> Result<BotCommand> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            UPDATE bot_commands
            SET command = ?, description = ?, response_template = ?, admin_only = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&definition.command)
        .bind(&definition.description)
        .bind(&definition.response_template)
        .bind(definition.admin_only as i32)
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Bot command not found".to_string()));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated bot command".to_string()))
    }

    async fn list(&self) -> Result<Vec<BotCommand>> {
        let rows = sqlx::query_as::<_, BotCommandRow>(
            r#"
            SELECT id, command, description, response_template, admin_only, created_at, updated_at
            FROM bot_commands
            ORDER BY command ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_command).collect()
    }
}
