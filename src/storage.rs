//! Object storage for generated documents and branding assets.
//!
//! The pipeline only ever talks to the [`ObjectStorage`] trait; production uses
//! the Supabase Storage REST API through the shared `reqwest` client, tests
//! substitute an in-memory mock.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::SupabaseConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Request(String),
    #[error("storage responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("object not found: {0}")]
    NotFound(String),
}

/// Durable blob storage exposed to the submission pipeline.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload_file(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError>;

    async fn download_file(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Stable public URL for an uploaded object. Does not check existence.
    fn public_url(&self, key: &str) -> String;
}

/// Supabase Storage implementation of [`ObjectStorage`].
///
/// Quote documents are written to the quotes bucket; `download_file` reads from
/// the branding bucket, which is where the PDF renderer keeps its logo assets.
pub struct SupabaseStorage {
    config: SupabaseConfig,
    client: reqwest::Client,
}

impl SupabaseStorage {
    pub fn new(config: SupabaseConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.project_url, bucket, key
        )
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload_file(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        let response = self
            .client
            .post(self.object_url(&self.config.quotes_bucket, key))
            .bearer_auth(&self.config.service_key)
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Status {
                status: status.as_u16(),
                body,
            });
        }

        log::info!(
            "Uploaded object '{}' to bucket '{}'",
            key,
            self.config.quotes_bucket
        );
        Ok(())
    }

    async fn download_file(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let response = self
            .client
            .get(self.object_url(&self.config.branding_bucket, key))
            .bearer_auth(&self.config.service_key)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(StorageError::NotFound(key.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.project_url, self.config.quotes_bucket, key
        )
    }
}
