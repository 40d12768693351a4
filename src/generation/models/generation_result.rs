use std::path::PathBuf;

use image::DynamicImage;

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub image: DynamicImage,
    pub seed: u32,
    pub saved_path: Option<PathBuf>,
}
