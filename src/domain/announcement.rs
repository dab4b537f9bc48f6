use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub status: AnnouncementStatus,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Announcement {
    /// Published announcements are frozen: no edits, no deletion.
    pub fn is_locked(&self) -> bool {
        self.status == AnnouncementStatus::Published
    }

    /// Only drafts and rejected announcements may change. A pending one is
    /// being validated and must keep the content the verdict is about.
    pub fn is_editable(&self) -> bool {
        matches!(
            self.status,
            AnnouncementStatus::Draft | AnnouncementStatus::ValidationFailed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementStatus {
    Draft,
    PendingValidation,
    ValidationFailed,
    Published,
}

impl AnnouncementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementStatus::Draft => "draft",
            AnnouncementStatus::PendingValidation => "pending_validation",
            AnnouncementStatus::ValidationFailed => "validation_failed",
            AnnouncementStatus::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(AnnouncementStatus::Draft),
            "pending_validation" => Some(AnnouncementStatus::PendingValidation),
            "validation_failed" => Some(AnnouncementStatus::ValidationFailed),
            "published" => Some(AnnouncementStatus::Published),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnnouncementRequest {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(min = 1, max = 10000), custom(function = "not_blank"))]
    pub content: String,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAnnouncementRequest {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 10000), custom(function = "not_blank"))]
    pub content: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementFilter {
    pub owner_id: Option<Uuid>,
    pub status: Option<AnnouncementStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only_fields_are_rejected() {
        let request = CreateAnnouncementRequest {
            title: "   ".to_string(),
            content: "Real content".to_string(),
            owner_id: Uuid::new_v4(),
        };
        assert!(request.validate().is_err());

        let request = UpdateAnnouncementRequest {
            title: None,
            content: Some("\n\t".to_string()),
        };
        assert!(request.validate().is_err());

        let request = UpdateAnnouncementRequest::default();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_only_draft_and_rejected_are_editable() {
        let now = Utc::now();
        let mut announcement = Announcement {
            id: Uuid::new_v4(),
            title: "Title".to_string(),
            content: "Content".to_string(),
            status: AnnouncementStatus::Draft,
            owner_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };
        assert!(announcement.is_editable());

        announcement.status = AnnouncementStatus::ValidationFailed;
        assert!(announcement.is_editable());

        announcement.status = AnnouncementStatus::PendingValidation;
        assert!(!announcement.is_editable());
        assert!(!announcement.is_locked());

        announcement.status = AnnouncementStatus::Published;
        assert!(!announcement.is_editable());
    }
}
