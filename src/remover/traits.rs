//! Capability trait for background-removal models

use thiserror::Error;

/// Failure of a background-removal invocation
#[derive(Error, Debug)]
pub enum RemoverError {
    #[error(transparent)]
    Model(#[from] imgly_bgremove::BgRemovalError),

    #[error("{0}")]
    Failed(String),
}

/// Turns encoded image bytes into a PNG with the background made transparent.
///
/// Calls are synchronous and may take seconds of CPU/GPU time; callers are
/// expected to run them on a blocking worker, never on the request dispatcher.
pub trait BackgroundRemover: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn remove(&self, image: &[u8]) -> Result<Vec<u8>, RemoverError>;
}
