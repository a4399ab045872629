//! Gateway module - request pipeline and blocking worker pool

pub mod pipeline;
pub mod worker_pool;

pub use pipeline::{BackgroundRemovalGateway, ImagePayload, ImageRequest};
pub use worker_pool::WorkerPool;
