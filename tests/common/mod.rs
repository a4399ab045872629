//! Shared stubs for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Bytes, Router};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bg_removal_gateway::{
    api,
    config::Settings,
    fetch::{FetchedImage, ImageFetcher},
    gateway::{BackgroundRemovalGateway, WorkerPool},
    remover::{format::detect_image_format, format::PNG_SIGNATURE, BackgroundRemover, RemoverError},
    storage::{ObjectStore, PutObject},
    AppState, Result,
};

pub fn png_bytes() -> Vec<u8> {
    let mut data = PNG_SIGNATURE.to_vec();
    data.extend_from_slice(b"\0\0\0\rIHDR-transparent");
    data
}

pub fn jpeg_bytes() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F']
}

#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Returns a PNG for any recognisable image, fails otherwise
    Transparent,
    /// Returns bytes that are not a PNG
    Garbage,
}

/// Remover stub with call counting and optional latency
pub struct StubRemover {
    behavior: Behavior,
    delay: Duration,
    calls: AtomicUsize,
    running: AtomicUsize,
    peak: AtomicUsize,
}

impl StubRemover {
    pub fn new(behavior: Behavior) -> Self {
        Self::with_delay(behavior, Duration::ZERO)
    }

    pub fn with_delay(behavior: Behavior, delay: Duration) -> Self {
        Self {
            behavior,
            delay,
            calls: AtomicUsize::new(0),
            running: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl BackgroundRemover for StubRemover {
    fn name(&self) -> &str {
        "stub"
    }

    fn remove(&self, image: &[u8]) -> std::result::Result<Vec<u8>, RemoverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.running.fetch_sub(1, Ordering::SeqCst);

        if detect_image_format(image).is_none() {
            return Err(RemoverError::Failed("cannot identify image file".to_string()));
        }

        match self.behavior {
            Behavior::Transparent => Ok(png_bytes()),
            Behavior::Garbage => Ok(b"not an image".to_vec()),
        }
    }
}

/// Fetcher stub that always answers with the same image
pub struct StubFetcher {
    image: Bytes,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            image: Bytes::from(image),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageFetcher for StubFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FetchedImage {
            bytes: self.image.clone(),
            content_type: Some("image/jpeg".to_string()),
        })
    }
}

/// Store that only counts upload attempts
#[derive(Default)]
pub struct RecordingStore {
    uploads: AtomicUsize,
}

impl RecordingStore {
    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn put_object(&self, _object: PutObject) -> Result<()> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn build_app(
    fetcher: Arc<dyn ImageFetcher>,
    remover: Arc<dyn BackgroundRemover>,
    store: Arc<dyn ObjectStore>,
    workers: usize,
) -> Router {
    let gateway =
        BackgroundRemovalGateway::new(fetcher, remover, store, WorkerPool::new(workers));
    let state = AppState::new(Settings::default(), gateway);
    api::routes::create_router(Arc::new(state)).unwrap()
}
