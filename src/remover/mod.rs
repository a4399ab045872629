//! Background removal - capability trait, in-process model, and format sniffing

pub mod format;
pub mod imgly;
pub mod traits;

pub use imgly::ImglyRemover;
pub use traits::{BackgroundRemover, RemoverError};
