use serde::Serialize;

use super::generation_result::GenerationResult;

#[derive(Debug, Serialize)]
pub struct GenerateImageResponse {
    pub seed: u32,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_path: Option<String>,
    /// Base64 encoded PNG.
    pub image: String,
}

impl GenerateImageResponse {
    pub fn new(result: &GenerationResult, png: &[u8]) -> Self {
        Self {
            seed: result.seed,
            width: result.image.width(),
            height: result.image.height(),
            saved_path: result
                .saved_path
                .as_ref()
                .map(|path| path.display().to_string()),
            image: base64::encode(png),
        }
    }
}
