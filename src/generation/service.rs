use std::path::{Path, PathBuf};

use chrono::Local;
use rand::Rng;

use crate::{app::models::api_error::ApiError, pipeline::ImageGenerationService};

use super::{
    errors::GenerationApiError,
    models::{
        generation_request::GenerationRequest, generation_result::GenerationResult,
        pipeline_args::PipelineArgs,
    },
    util::{outputs, placeholders},
};

pub const MAX_RANDOM_SEED: u32 = 10_000_000;

/// Runs one request against the pipeline: one call, first image kept.
pub async fn generate_image(
    request: &GenerationRequest,
    pipeline: &dyn ImageGenerationService,
    outputs_dir: &Path,
) -> Result<GenerationResult, ApiError> {
    let input_images = collect_input_images(&request.input_images);
    let seed = resolve_seed(request.seed, request.randomize_seed, &mut rand::thread_rng());

    warn_on_missing_images(&request.prompt, input_images.len());

    let args = PipelineArgs::new(request, input_images, seed);
    tracing::debug!(?args, "calling pipeline");

    let images = pipeline.generate(&args).await?;
    let generated = images.len();
    let Some(image) = images.into_iter().next() else {
        tracing::error!("pipeline returned no images");
        return Err(GenerationApiError::NoImageGenerated.value());
    };

    tracing::info!(
        seed,
        generated,
        width = image.width(),
        height = image.height(),
        "generated image"
    );

    let saved_path = match request.save_images {
        true => Some(outputs::save_image(&image, outputs_dir, &Local::now())?),
        false => None,
    };

    Ok(GenerationResult {
        image,
        seed,
        saved_path,
    })
}

/// Empty slots are dropped; the remaining paths keep their slot order.
pub fn collect_input_images(slots: &[Option<PathBuf>]) -> Vec<PathBuf> {
    slots.iter().flatten().cloned().collect()
}

pub fn resolve_seed<R: Rng>(seed: u32, randomize: bool, rng: &mut R) -> u32 {
    match randomize {
        true => rng.gen_range(0..=MAX_RANDOM_SEED),
        false => seed,
    }
}

fn warn_on_missing_images(prompt: &str, supplied: usize) {
    let missing: Vec<usize> = placeholders::referenced_image_slots(prompt)
        .into_iter()
        .filter(|slot| *slot == 0 || *slot > supplied)
        .collect();

    if !missing.is_empty() {
        tracing::warn!(
            ?missing,
            supplied,
            "prompt references image slots that were not supplied"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use axum::http::StatusCode;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use rand::{rngs::StdRng, SeedableRng};

    use crate::pipeline::stub::StubPipeline;

    use super::*;

    fn request(prompt: &str) -> GenerationRequest {
        GenerationRequest {
            prompt: prompt.to_string(),
            input_images: [None, None, None],
            height: 1024,
            width: 1024,
            guidance_scale: 2.5,
            img_guidance_scale: 1.6,
            inference_steps: 50,
            seed: 42,
            separate_cfg_infer: true,
            offload_model: false,
            use_input_image_size_as_output: false,
            max_input_image_size: 1024,
            randomize_seed: false,
            save_images: false,
        }
    }

    #[tokio::test]
    async fn text_only_forwards_empty_image_list() {
        let temp = tempfile::tempdir().unwrap();
        let outputs_dir = temp.path().join("outputs");
        let pipeline = StubPipeline::default();

        let result = generate_image(
            &request("A woman holds a bouquet facing the camera."),
            &pipeline,
            &outputs_dir,
        )
        .await
        .unwrap();

        let calls = pipeline.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].input_images.is_empty());
        assert_eq!(calls[0].seed, 42);
        assert_eq!(calls[0].guidance_scale, 2.5);
        assert!(calls[0].use_kv_cache);
        assert!(calls[0].offload_kv_cache);

        assert_eq!((result.image.width(), result.image.height()), (1024, 1024));
        assert_eq!(result.saved_path, None);
        assert!(!outputs_dir.exists());
    }

    #[tokio::test]
    async fn forwards_supplied_images_in_slot_order() {
        let temp = tempfile::tempdir().unwrap();
        let pipeline = StubPipeline::default();

        let mut req = request("<img><|image_1|></img> and <img><|image_2|></img>");
        req.input_images = [
            None,
            Some(PathBuf::from("b.png")),
            Some(PathBuf::from("c.png")),
        ];

        generate_image(&req, &pipeline, temp.path()).await.unwrap();

        assert_eq!(
            pipeline.calls()[0].input_images,
            vec![PathBuf::from("b.png"), PathBuf::from("c.png")]
        );
    }

    #[tokio::test]
    async fn keeps_only_the_first_image() {
        let temp = tempfile::tempdir().unwrap();
        let pipeline = StubPipeline::returning(3);

        let result = generate_image(&request("three cats"), &pipeline, temp.path())
            .await
            .unwrap();

        assert_eq!(result.image.to_rgb8().get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(pipeline.calls().len(), 1);
    }

    #[tokio::test]
    async fn no_images_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let pipeline = StubPipeline::returning(0);

        let err = generate_image(&request("nothing"), &pipeline, temp.path())
            .await
            .unwrap_err();

        assert_eq!(err.code, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn randomized_seeds_stay_in_range_and_vary() {
        let temp = tempfile::tempdir().unwrap();
        let pipeline = StubPipeline::default();
        let mut req = request("a lighthouse at dusk");
        req.randomize_seed = true;

        let mut seeds = HashSet::new();
        for _ in 0..5 {
            let result = generate_image(&req, &pipeline, temp.path()).await.unwrap();
            assert!(result.seed <= MAX_RANDOM_SEED);
            seeds.insert(result.seed);
        }

        assert!(seeds.len() > 1);
        let forwarded: Vec<u32> = pipeline.calls().iter().map(|args| args.seed).collect();
        assert_eq!(forwarded.len(), 5);
        assert!(forwarded.iter().all(|seed| seeds.contains(seed)));
    }

    #[test]
    fn fixed_seed_is_kept() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(resolve_seed(123, false, &mut rng), 123);
        assert!(resolve_seed(123, true, &mut rng) <= MAX_RANDOM_SEED);
    }

    #[tokio::test]
    async fn saves_into_outputs_dir() {
        let temp = tempfile::tempdir().unwrap();
        let outputs_dir = temp.path().join("outputs");
        let pipeline = StubPipeline::default();
        let mut req = request("a red bicycle");
        req.save_images = true;
        req.height = 128;
        req.width = 256;

        let result = generate_image(&req, &pipeline, &outputs_dir).await.unwrap();

        let path = result.saved_path.unwrap();
        assert_eq!(path.parent(), Some(outputs_dir.as_path()));
        assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("png"));
        let saved = image::open(&path).unwrap();
        assert_eq!((saved.width(), saved.height()), (256, 128));
    }

    #[tokio::test]
    async fn output_matches_input_size_when_requested() {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("zhang.png");
        DynamicImage::ImageRgb8(RgbImage::new(320, 240))
            .save_with_format(&input, ImageFormat::Png)
            .unwrap();

        let pipeline = StubPipeline::default();
        let mut req = request("The woman in <img><|image_1|></img> waves her hand happily in the crowd");
        req.input_images = [Some(input), None, None];
        req.use_input_image_size_as_output = true;

        let result = generate_image(&req, &pipeline, temp.path()).await.unwrap();

        assert!(pipeline.calls()[0].use_input_image_size_as_output);
        assert_eq!((result.image.width(), result.image.height()), (320, 240));
    }

    #[test]
    fn collects_nothing_from_empty_slots() {
        assert!(collect_input_images(&[None, None, None]).is_empty());
    }
}
