use serde::Serialize;

use crate::generation::models::pipeline_args::PipelineArgs;

#[derive(Debug, Serialize)]
pub struct InputSpec {
    pub model: String,
    pub prompt: String,
    /// Base64 encoded file contents, in slot order.
    pub input_images: Vec<String>,
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

impl InputSpec {
    pub fn new(model: &str, args: &PipelineArgs, input_images: Vec<String>) -> Self {
        Self {
            model: model.to_string(),
            prompt: args.prompt.to_string(),
            input_images,
            height: args.height,
            width: args.width,
            guidance_scale: args.guidance_scale,
            img_guidance_scale: args.img_guidance_scale,
            num_inference_steps: args.num_inference_steps,
            separate_cfg_infer: args.separate_cfg_infer,
            use_kv_cache: args.use_kv_cache,
            offload_kv_cache: args.offload_kv_cache,
            offload_model: args.offload_model,
            use_input_image_size_as_output: args.use_input_image_size_as_output,
            seed: args.seed,
            max_input_image_size: args.max_input_image_size,
        }
    }
}
