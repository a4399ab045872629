//! Upstream image fetching - trait and reqwest-backed client

pub mod http_fetcher;
pub mod traits;

pub use http_fetcher::HttpFetcher;
pub use traits::{FetchedImage, ImageFetcher};
