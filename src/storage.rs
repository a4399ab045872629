//! Object storage seam.
//!
//! Credentials are read at startup and kept here, but the request path never
//! uploads: `output_key` is accepted and ignored.

use async_trait::async_trait;
use axum::body::Bytes;
use tracing::info;

use crate::config::StorageConfig;
use crate::error::{AppError, Result};

/// A single object upload
#[derive(Debug, Clone)]
pub struct PutObject {
    pub key: String,
    pub body: Bytes,
    pub content_type: String,
    pub acl: Option<String>,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, object: PutObject) -> Result<()>;
}

/// Store that refuses every upload
#[derive(Debug, Default)]
pub struct DisabledStore {
    bucket: Option<String>,
}

impl DisabledStore {
    pub fn from_config(config: &StorageConfig) -> Self {
        info!(
            region = config.region.as_deref().unwrap_or("unset"),
            bucket = config.bucket.as_deref().unwrap_or("unset"),
            credentials = config.has_credentials(),
            "Object storage configured; uploads are disabled"
        );
        Self {
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for DisabledStore {
    async fn put_object(&self, object: PutObject) -> Result<()> {
        Err(AppError::Internal(format!(
            "Object storage uploads are disabled (bucket: {}, key: {})",
            self.bucket.as_deref().unwrap_or("unset"),
            object.key
        )))
    }
}
