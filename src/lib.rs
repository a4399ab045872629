//! Background-Removal Gateway
//!
//! A small HTTP service that fetches an image by URL, hands it to an in-process
//! background-removal model on a bounded worker pool, and returns the PNG.

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod gateway;
pub mod remover;
pub mod storage;
pub mod telemetry;

pub use error::{AppError, Result};

use std::sync::Arc;
use tokio::runtime::Handle;

use crate::config::Settings;
use crate::fetch::HttpFetcher;
use crate::gateway::{BackgroundRemovalGateway, WorkerPool};
use crate::remover::ImglyRemover;
use crate::storage::{DisabledStore, ObjectStore};

/// Application state shared across all handlers. Built once at startup and
/// never mutated afterwards.
pub struct AppState {
    pub settings: Arc<Settings>,
    pub gateway: BackgroundRemovalGateway,
}

impl AppState {
    pub fn new(settings: Settings, gateway: BackgroundRemovalGateway) -> Self {
        Self {
            settings: Arc::new(settings),
            gateway,
        }
    }

    /// Wire the production collaborators described by `settings`.
    ///
    /// Must be called from within a tokio runtime; the model runs its async
    /// entry point on that runtime from blocking workers.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| AppError::Internal(format!("No tokio runtime: {}", e)))?;

        let fetcher = Arc::new(HttpFetcher::new(&settings.fetch)?);
        let remover = Arc::new(
            ImglyRemover::from_config(&settings.remover, runtime)
                .map_err(|e| AppError::Config(::config::ConfigError::Message(e.to_string())))?,
        );
        let storage: Arc<dyn ObjectStore> = Arc::new(DisabledStore::from_config(&settings.storage));
        let workers = WorkerPool::new(settings.remover.max_concurrent);

        let gateway = BackgroundRemovalGateway::new(fetcher, remover, storage, workers);
        Ok(Self::new(settings, gateway))
    }
}
