//! In-process background remover backed by `imgly_bgremove`

use imgly_bgremove::{
    remove_background_from_bytes, ExecutionProvider, ModelSource, ModelSpec, OutputFormat,
    RemovalConfig,
};
use std::path::PathBuf;
use tokio::runtime::Handle;
use tracing::debug;

use crate::config::RemoverConfig;
use crate::remover::traits::{BackgroundRemover, RemoverError};

/// Runs the ONNX segmentation model inside this process.
///
/// `remove` must be called from a blocking thread (e.g. `spawn_blocking`);
/// it drives the library's async entry point with `Handle::block_on`.
pub struct ImglyRemover {
    config: RemovalConfig,
    runtime: Handle,
}

impl ImglyRemover {
    /// Create a remover from configuration
    pub fn from_config(config: &RemoverConfig, runtime: Handle) -> Result<Self, RemoverError> {
        let source = match &config.model_path {
            Some(path) => ModelSource::External(PathBuf::from(path)),
            None => ModelSource::Downloaded(config.model.clone()),
        };

        let removal_config = RemovalConfig::builder()
            .model_spec(ModelSpec {
                source,
                variant: config.variant.clone(),
            })
            .execution_provider(parse_execution_provider(&config.execution_provider)?)
            .output_format(OutputFormat::Png)
            .build()?;

        Ok(Self {
            config: removal_config,
            runtime,
        })
    }

    pub fn config(&self) -> &RemovalConfig {
        &self.config
    }
}

fn parse_execution_provider(name: &str) -> Result<ExecutionProvider, RemoverError> {
    match name.to_lowercase().as_str() {
        "auto" => Ok(ExecutionProvider::Auto),
        "cpu" => Ok(ExecutionProvider::Cpu),
        "cuda" => Ok(ExecutionProvider::Cuda),
        "coreml" => Ok(ExecutionProvider::CoreMl),
        other => Err(RemoverError::Failed(format!(
            "unknown execution provider '{}'",
            other
        ))),
    }
}

impl BackgroundRemover for ImglyRemover {
    fn name(&self) -> &str {
        "imgly"
    }

    fn remove(&self, image: &[u8]) -> Result<Vec<u8>, RemoverError> {
        let result = self
            .runtime
            .block_on(remove_background_from_bytes(image, &self.config))?;
        let png = result.to_bytes(OutputFormat::Png, 100)?;

        debug!(
            model = %self.config.model_spec.source.display_name(),
            input_bytes = image.len(),
            output_bytes = png.len(),
            "Model finished"
        );

        Ok(png)
    }
}
