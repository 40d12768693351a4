use std::path::PathBuf;

use serde::Serialize;

use crate::generation::{
    dtos::generate_image_dto::DEFAULT_SIZE,
    models::generation_request::{GenerationRequest, MAX_INPUT_IMAGES},
};

pub const EXAMPLE_INFERENCE_STEPS: u32 = 50;
pub const EXAMPLE_SEPARATE_CFG_INFER: bool = true;
pub const EXAMPLE_OFFLOAD_MODEL: bool = false;

#[derive(Debug, Clone, Serialize)]
pub struct ExampleEntry {
    pub prompt: &'static str,
    pub images: [Option<&'static str>; MAX_INPUT_IMAGES],
    /// `None` leaves the size to the input image.
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub guidance_scale: f32,
    pub img_guidance_scale: f32,
    pub seed: u32,
    pub max_input_image_size: u32,
    pub randomize_seed: bool,
    pub use_input_image_size_as_output: bool,
}

impl ExampleEntry {
    /// Fills in the execution settings examples always run with.
    pub fn to_request(&self, save_images: bool) -> GenerationRequest {
        GenerationRequest {
            prompt: self.prompt.to_string(),
            input_images: self.images.map(|image| image.map(PathBuf::from)),
            height: self.height.unwrap_or(DEFAULT_SIZE),
            width: self.width.unwrap_or(DEFAULT_SIZE),
            guidance_scale: self.guidance_scale,
            img_guidance_scale: self.img_guidance_scale,
            inference_steps: EXAMPLE_INFERENCE_STEPS,
            seed: self.seed,
            separate_cfg_infer: EXAMPLE_SEPARATE_CFG_INFER,
            offload_model: EXAMPLE_OFFLOAD_MODEL,
            use_input_image_size_as_output: self.use_input_image_size_as_output,
            max_input_image_size: self.max_input_image_size,
            randomize_seed: self.randomize_seed,
            save_images,
        }
    }
}
