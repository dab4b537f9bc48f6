use std::sync::Arc;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::*,
    error::{AppError, Result},
    repository::AnnouncementRepository,
    service::validation_service::ValidationService,
};

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub announcement: Announcement,
    pub verdict: ValidationResult,
}

pub struct AnnouncementService {
    repo: Arc<dyn AnnouncementRepository>,
    validation: Arc<ValidationService>,
}

impl AnnouncementService {
    pub fn new(repo: Arc<dyn AnnouncementRepository>, validation: Arc<ValidationService>) -> Self {
        Self { repo, validation }
    }

    pub async fn list(&self, filter: &AnnouncementFilter, limit: i64, offset: i64) -> Result<Vec<Announcement>> {
        self.repo.list(filter, limit, offset).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Announcement> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Announcement not found".to_string()))
    }

    pub async fn create(&self, request: CreateAnnouncementRequest) -> Result<Announcement> {
        request
            .validate()
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;

        let now = Utc::now();
        let announcement = Announcement {
            id: Uuid::new_v4(),
            title: request.title,
            content: request.content,
            status: AnnouncementStatus::Draft,
            owner_id: request.owner_id,
            created_at: now,
            updated_at: now,
        };

        self.repo.create(announcement).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateAnnouncementRequest) -> Result<Announcement> {
        request
            .validate()
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;

        let mut announcement = self.get(id).await?;
        Self::ensure_editable(&announcement, "edited")?;

        if let Some(title) = request.title {
            announcement.title = title;
        }
        if let Some(content) = request.content {
            announcement.content = content;
        }
        // Edited content has to pass validation again.
        if announcement.status == AnnouncementStatus::ValidationFailed {
            announcement.status = AnnouncementStatus::Draft;
        }

        // The write only lands while the row is still editable; a submission
        // may have started since it was read.
        self.repo
            .update(id, announcement)
            .await?
            .ok_or_else(|| AppError::Conflict("Announcement is no longer editable".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let announcement = self.get(id).await?;
        Self::ensure_editable(&announcement, "deleted")?;

        if !self.repo.delete(id).await? {
            return Err(AppError::Conflict("Announcement is no longer editable".to_string()));
        }
        Ok(())
    }

    /// Move an announcement through validation. It stays pending if the
    /// classifier call fails, so it can be submitted again.
    pub async fn submit(&self, id: Uuid) -> Result<SubmissionOutcome> {
        let announcement = self.get(id).await?;
        if announcement.is_locked() {
            return Err(AppError::Conflict("Announcement is already published".to_string()));
        }
        let request = ContentRequest::new(announcement.title, announcement.content);
        request.require()?;

        let pending = self
            .repo
            .mark_pending(id)
            .await?
            .ok_or_else(|| AppError::Conflict("Announcement is already published".to_string()))?;

        // Validate exactly what is stored as pending.
        let request = ContentRequest::new(pending.title.clone(), pending.content.clone());
        let verdict = self.validation.validate(&request).await?;

        let status = if verdict.is_valid {
            AnnouncementStatus::Published
        } else {
            AnnouncementStatus::ValidationFailed
        };
        let announcement = self
            .repo
            .complete_validation(&pending, status)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Announcement changed while it was being validated".to_string())
            })?;

        tracing::info!("Announcement {} is now {}", id, status.as_str());

        Ok(SubmissionOutcome { announcement, verdict })
    }

    fn ensure_editable(announcement: &Announcement, action: &str) -> Result<()> {
        if announcement.is_locked() {
            return Err(AppError::Conflict(format!("Published announcements cannot be {}", action)));
        }
        if !announcement.is_editable() {
            return Err(AppError::Conflict(format!(
                "Announcements pending validation cannot be {}",
                action
            )));
        }
        Ok(())
    }
}
