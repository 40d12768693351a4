use std::path::PathBuf;

use serde::Serialize;

use super::generation_request::GenerationRequest;

/// The normalized arguments forwarded to the image generation service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineArgs {
    pub prompt: String,
    pub input_images: Vec<PathBuf>,
    pub height: u32,
    pub width: u32,
    pub guidance_scale: f32,
    pub img_guidance_scale: f32,
    pub num_inference_steps: u32,
    pub separate_cfg_infer: bool,
    pub use_kv_cache: bool,
    pub offload_kv_cache: bool,
    pub offload_model: bool,
    pub use_input_image_size_as_output: bool,
    pub seed: u32,
    pub max_input_image_size: u32,
}

impl PipelineArgs {
    pub fn new(request: &GenerationRequest, input_images: Vec<PathBuf>, seed: u32) -> Self {
        Self {
            prompt: request.prompt.to_string(),
            input_images,
            height: request.height,
            width: request.width,
            guidance_scale: request.guidance_scale,
            img_guidance_scale: request.img_guidance_scale,
            num_inference_steps: request.inference_steps,
            separate_cfg_infer: request.separate_cfg_infer,
            use_kv_cache: true,
            offload_kv_cache: true,
            offload_model: request.offload_model,
            use_input_image_size_as_output: request.use_input_image_size_as_output,
            seed,
            max_input_image_size: request.max_input_image_size,
        }
    }
}
