use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    config::BackendConfig,
    domain::BucketSpec,
    error::{AppError, Result},
    integrations::{ensure_success, StorageAdmin},
};

/// Bucket administration against the hosted project's storage REST API,
/// authenticated with the service key.
pub struct StorageClient {
    http: reqwest::Client,
    config: BackendConfig,
}

#[derive(Deserialize)]
struct Bucket {
    id: String,
}

impl StorageClient {
    pub fn new(http: reqwest::Client, config: BackendConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self) -> String {
        format!("{}/storage/v1/bucket", self.config.url.trim_end_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        if self.config.service_key.is_empty() {
            return Err(AppError::Config("Backend service key not configured".to_string()));
        }
        Ok(request
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key))
    }
}

#[async_trait]
impl StorageAdmin for StorageClient {
    fn name(&self) -> &str {
        "Storage"
    }

    async fn list_buckets(&self) -> Result<Vec<String>> {
        let response = self.authorize(self.http.get(self.endpoint()))?.send().await?;
        let response = ensure_success(self.name(), response).await?;

        let buckets: Vec<Bucket> = response.json().await?;
        Ok(buckets.into_iter().map(|b| b.id).collect())
    }

    async fn create_bucket(&self, spec: &BucketSpec) -> Result<()> {
        let response = self
            .authorize(self.http.post(self.endpoint()))?
            .json(spec)
            .send()
            .await?;
        ensure_success(self.name(), response).await?;

        Ok(())
    }
}
