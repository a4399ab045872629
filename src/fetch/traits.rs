//! Capability trait for retrieving source images

use async_trait::async_trait;
use axum::body::Bytes;

use crate::error::Result;

/// Raw bytes fetched from an upstream URL
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Bytes,

    /// `Content-Type` reported by the upstream, if any
    pub content_type: Option<String>,
}

impl FetchedImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Performs a GET against an arbitrary URL.
///
/// Implementations must report transport failures as
/// [`AppError::Network`](crate::error::AppError::Network) and non-2xx
/// answers as [`AppError::UpstreamFetch`](crate::error::AppError::UpstreamFetch).
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedImage>;
}
