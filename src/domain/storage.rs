use serde::{Deserialize, Serialize};

pub const ANNOUNCEMENTS_BUCKET: &str = "announcements";

/// Maximum upload size for the announcements bucket (10 MB)
pub const ANNOUNCEMENTS_FILE_SIZE_LIMIT: u64 = 10 * 1024 * 1024;

pub const ANNOUNCEMENTS_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSpec {
    pub id: String,
    pub name: String,
    pub public: bool,
    pub file_size_limit: u64,
    pub allowed_mime_types: Vec<String>,
}

impl BucketSpec {
    pub fn announcements() -> Self {
        Self {
            id: ANNOUNCEMENTS_BUCKET.to_string(),
            name: ANNOUNCEMENTS_BUCKET.to_string(),
            public: true,
            file_size_limit: ANNOUNCEMENTS_FILE_SIZE_LIMIT,
            allowed_mime_types: ANNOUNCEMENTS_MIME_TYPES.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketStatus {
    pub bucket: String,
    pub existed: bool,
    pub created: bool,
}
