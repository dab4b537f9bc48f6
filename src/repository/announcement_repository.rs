use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow, QueryBuilder, Sqlite};
use uuid::Uuid;

use crate::{
    domain::{Announcement, AnnouncementFilter, AnnouncementStatus},
    error::{AppError, Result},
    repository::AnnouncementRepository,
};

#[derive(FromRow)]
struct AnnouncementRow {
    id: String,
    title: String,
    content: String,
    status: String,
    owner_id: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, title, content, status, owner_id, created_at, updated_at
    FROM announcements
"#;

pub struct SqliteAnnouncementRepository {
    pool: SqlitePool,
}

impl SqliteAnnouncementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_announcement(row: AnnouncementRow) -> Result<Announcement> {
        Ok(Announcement {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            content: row.content,
            status: AnnouncementStatus::parse(&row.status).ok_or_else(|| {
                AppError::Database(format!("Invalid announcement status: {}", row.status))
            })?,
            owner_id: Uuid::parse_str(&row.owner_id).map_err(|e| AppError::Database(e.to_string()))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl AnnouncementRepository for SqliteAnnouncementRepository {
    async fn create(&self, announcement: Announcement) -> Result<Announcement> {
        let id_str = announcement.id.to_string();
        let owner_id_str = announcement.owner_id.to_string();

        sqlx::query(
            r#"
            INSERT INTO announcements (
                id, title, content, status, owner_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&id_str)
        .bind(&announcement.title)
        .bind(&announcement.content)
        .bind(announcement.status.as_str())
        .bind(&owner_id_str)
        .bind(announcement.created_at.naive_utc())
        .bind(announcement.updated_at.naive_utc())
        .execute(&self.pool)
        .await?;

        self.find_by_id(announcement.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created announcement".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_announcement).transpose()
    }

    async fn list(&self, filter: &AnnouncementFilter, limit: i64, offset: i64) -> Result<Vec<Announcement>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_COLUMNS);
        query.push(" WHERE 1 = 1");

        if let Some(owner_id) = filter.owner_id {
            query.push(" AND owner_id = ").push_bind(owner_id.to_string());
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }

        query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = query
            .build_query_as::<AnnouncementRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(Self::row_to_announcement)
            .collect()
    }

    async fn update(&self, id: Uuid, announcement: Announcement) -> Result<Option<Announcement>> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            UPDATE announcements
            SET title = ?, content = ?, status = ?, updated_at = ?
            WHERE id = ? AND status IN ('draft', 'validation_failed')
            "#
        )
        .bind(&announcement.title)
        .bind(&announcement.content)
        .bind(announcement.status.as_str())
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn mark_pending(&self, id: Uuid) -> Result<Option<Announcement>> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            UPDATE announcements
            SET status = 'pending_validation', updated_at = ?
            WHERE id = ? AND status != 'published'
            "#
        )
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn complete_validation(&self, validated: &Announcement, status: AnnouncementStatus) -> Result<Option<Announcement>> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            UPDATE announcements
            SET status = ?, updated_at = ?
            WHERE id = ? AND status = 'pending_validation' AND title = ? AND content = ?
            "#
        )
        .bind(status.as_str())
        .bind(now)
        .bind(validated.id.to_string())
        .bind(&validated.title)
        .bind(&validated.content)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(validated.id).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM announcements WHERE id = ? AND status IN ('draft', 'validation_failed')"
        )
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
