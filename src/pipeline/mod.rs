use async_trait::async_trait;
use image::DynamicImage;

use crate::{app::models::api_error::ApiError, generation::models::pipeline_args::PipelineArgs};

pub mod errors;
pub mod remote;
#[cfg(test)]
pub mod stub;

/// A loaded image generation model. One call produces one or more images.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate(&self, args: &PipelineArgs) -> Result<Vec<DynamicImage>, ApiError>;
}
