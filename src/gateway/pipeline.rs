//! Fetch → delegate → respond pipeline behind `POST /remove-bg`

use axum::{
    body::Bytes,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::fetch::ImageFetcher;
use crate::gateway::worker_pool::WorkerPool;
use crate::remover::format::{detect_image_format, is_png};
use crate::remover::BackgroundRemover;
use crate::storage::ObjectStore;

/// Query parameters of a background-removal request
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRequest {
    #[serde(rename = "image_url")]
    pub source_url: String,

    /// Accepted for compatibility; has no effect
    #[serde(default)]
    pub output_key: Option<String>,
}

/// Processed image returned to the caller
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Bytes,
    pub content_type: &'static str,
}

impl ImagePayload {
    pub fn png(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: "image/png",
        }
    }
}

impl IntoResponse for ImagePayload {
    fn into_response(self) -> Response {
        ([(CONTENT_TYPE, self.content_type)], self.bytes).into_response()
    }
}

/// Stateless gateway: every call fetches and processes from scratch
#[derive(Clone)]
pub struct BackgroundRemovalGateway {
    fetcher: Arc<dyn ImageFetcher>,
    remover: Arc<dyn BackgroundRemover>,
    /// Held for `output_key` uploads, which are disabled
    storage: Arc<dyn ObjectStore>,
    workers: WorkerPool,
}

impl BackgroundRemovalGateway {
    pub fn new(
        fetcher: Arc<dyn ImageFetcher>,
        remover: Arc<dyn BackgroundRemover>,
        storage: Arc<dyn ObjectStore>,
        workers: WorkerPool,
    ) -> Self {
        Self {
            fetcher,
            remover,
            storage,
            workers,
        }
    }

    pub fn workers(&self) -> &WorkerPool {
        &self.workers
    }

    pub fn storage(&self) -> &Arc<dyn ObjectStore> {
        &self.storage
    }

    /// Fetch `request.source_url`, strip its background, and return the PNG
    pub async fn remove_background(&self, request: &ImageRequest) -> Result<ImagePayload> {
        let url = request.source_url.as_str();
        info!(url = %url, "Received request to remove background");

        if let Some(key) = &request.output_key {
            debug!(output_key = %key, "Ignoring output_key; uploads are disabled");
        }

        let fetched = self.fetcher.fetch(url).await?;
        info!(
            url = %url,
            bytes = fetched.len(),
            content_type = fetched.content_type.as_deref().unwrap_or("unknown"),
            detected_format = detect_image_format(&fetched.bytes).unwrap_or("unknown"),
            "Fetched source image"
        );

        let remover = self.remover.clone();
        let input = fetched.bytes;
        let output = self
            .workers
            .run(move || remover.remove(&input))
            .await?
            .map_err(|e| AppError::Processing(e.to_string()))?;

        if output.is_empty() {
            return Err(AppError::Processing("remover produced no output".to_string()));
        }
        if !is_png(&output) {
            return Err(AppError::Processing(format!(
                "remover output is not a PNG (detected: {})",
                detect_image_format(&output).unwrap_or("unknown")
            )));
        }

        info!(
            remover = %self.remover.name(),
            output_bytes = output.len(),
            "Background removed"
        );

        Ok(ImagePayload::png(output))
    }
}
