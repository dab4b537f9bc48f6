use std::sync::Arc;

use crate::{
    domain::{BucketSpec, BucketStatus},
    error::Result,
    integrations::StorageAdmin,
};

pub struct StorageService {
    storage: Arc<dyn StorageAdmin>,
}

impl StorageService {
    pub fn new(storage: Arc<dyn StorageAdmin>) -> Self {
        Self { storage }
    }

    /// Make sure the public announcements bucket exists, creating it if needed.
    pub async fn ensure_announcements_bucket(&self) -> Result<BucketStatus> {
        let spec = BucketSpec::announcements();
        let existed = self
            .storage
            .list_buckets()
            .await?
            .iter()
            .any(|id| id == &spec.id);

        if existed {
            tracing::info!("Bucket {} already exists", spec.id);
        } else {
            self.storage.create_bucket(&spec).await?;
            tracing::info!("Created bucket {}", spec.id);
        }

        Ok(BucketStatus {
            bucket: spec.id,
            existed,
            created: !existed,
        })
    }
}
