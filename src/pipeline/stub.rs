use std::sync::Mutex;

use async_trait::async_trait;
use image::{DynamicImage, Rgb, RgbImage};

use crate::{app::models::api_error::ApiError, generation::models::pipeline_args::PipelineArgs};

use super::ImageGenerationService;

/// Returns flat synthetic images and remembers every call.
#[derive(Default)]
pub struct StubPipeline {
    pub calls: Mutex<Vec<PipelineArgs>>,
    pub images_per_call: Option<usize>,
}

impl StubPipeline {
    pub fn returning(images_per_call: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            images_per_call: Some(images_per_call),
        }
    }

    pub fn calls(&self) -> Vec<PipelineArgs> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerationService for StubPipeline {
    async fn generate(&self, args: &PipelineArgs) -> Result<Vec<DynamicImage>, ApiError> {
        self.calls.lock().unwrap().push(args.clone());

        let (width, height) = match (args.use_input_image_size_as_output, args.input_images.first()) {
            (true, Some(path)) => {
                let size = imagesize::size(path).unwrap();
                (size.width as u32, size.height as u32)
            }
            _ => (args.width, args.height),
        };

        let count = self.images_per_call.unwrap_or(1);
        Ok((0..count)
            .map(|i| {
                let shade = (i as u8).wrapping_mul(40);
                DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([shade, 0, 0])))
            })
            .collect())
    }
}
