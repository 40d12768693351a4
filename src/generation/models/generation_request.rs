use std::path::PathBuf;

pub const MAX_INPUT_IMAGES: usize = 3;

/// Every value the form collects for one generation, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Slot order matters: slot `i` is referenced as `<|image_{i+1}|>` in the prompt.
    pub input_images: [Option<PathBuf>; MAX_INPUT_IMAGES],
    pub height: u32,
    pub width: u32,
    pub guidance_scale: f32,
    pub img_guidance_scale: f32,
    pub inference_steps: u32,
    pub seed: u32,
    pub separate_cfg_infer: bool,
    pub offload_model: bool,
    pub use_input_image_size_as_output: bool,
    pub max_input_image_size: u32,
    pub randomize_seed: bool,
    pub save_images: bool,
}
