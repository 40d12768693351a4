use std::path::Path;

use crate::{
    app::models::api_error::ApiError,
    generation::{self, models::generation_result::GenerationResult},
    pipeline::ImageGenerationService,
};

use super::{errors::CatalogApiError, models::example_entry::ExampleEntry};

static EXAMPLES: [ExampleEntry; 14] = [
    // text to image
    ExampleEntry {
        prompt: "A curly-haired man in a red shirt is drinking tea.",
        images: [None, None, None],
        height: Some(1024),
        width: Some(1024),
        guidance_scale: 2.5,
        img_guidance_scale: 1.6,
        seed: 0,
        max_input_image_size: 1024,
        randomize_seed: false,
        use_input_image_size_as_output: false,
    },
    // single image
    ExampleEntry {
        prompt: "The woman in <img><|image_1|></img> waves her hand happily in the crowd",
        images: [Some("./imgs/test_cases/zhang.png"), None, None],
        height: Some(1024),
        width: Some(1024),
        guidance_scale: 2.5,
        img_guidance_scale: 1.9,
        seed: 128,
        max_input_image_size: 1024,
        randomize_seed: false,
        use_input_image_size_as_output: false,
    },
    ExampleEntry {
        prompt: "A man in a black shirt is reading a book. The man is the right man in <img><|image_1|></img>.",
        images: [Some("./imgs/test_cases/two_man.jpg"), None, None],
        height: Some(1024),
        width: Some(1024),
        guidance_scale: 2.5,
        img_guidance_scale: 1.6,
        seed: 0,
        max_input_image_size: 1024,
        randomize_seed: false,
        use_input_image_size_as_output: false,
    },
    // multiple images
    ExampleEntry {
        prompt: "Two women are raising fried chicken legs in a bar. A woman is <img><|image_1|></img>. The other woman is <img><|image_2|></img>.",
        images: [
            Some("./imgs/test_cases/mckenna.jpg"),
            Some("./imgs/test_cases/Amanda.jpg"),
            None,
        ],
        height: Some(1024),
        width: Some(1024),
        guidance_scale: 2.5,
        img_guidance_scale: 1.8,
        seed: 65,
        max_input_image_size: 1024,
        randomize_seed: false,
        use_input_image_size_as_output: false,
    },
    ExampleEntry {
        prompt: "A man and a short-haired woman with a wrinkled face are standing in front of a bookshelf in a library. The man is the man in the middle of <img><|image_1|></img>, and the woman is the oldest woman in <img><|image_2|></img>",
        images: [
            Some("./imgs/test_cases/1.jpg"),
            Some("./imgs/test_cases/2.jpg"),
            None,
        ],
        height: Some(1024),
        width: Some(1024),
        guidance_scale: 2.5,
        img_guidance_scale: 1.6,
        seed: 60,
        max_input_image_size: 1024,
        randomize_seed: false,
        use_input_image_size_as_output: false,
    },
    ExampleEntry {
        prompt: "A man and a woman are sitting at a classroom desk. The man is the man with yellow hair in <img><|image_1|></img>. The woman is the woman on the left of <img><|image_2|></img>",
        images: [
            Some("./imgs/test_cases/3.jpg"),
            Some("./imgs/test_cases/4.jpg"),
            None,
        ],
        height: Some(1024),
        width: Some(1024),
        guidance_scale: 2.5,
        img_guidance_scale: 1.8,
        seed: 66,
        max_input_image_size: 1024,
        randomize_seed: false,
        use_input_image_size_as_output: false,
    },
    ExampleEntry {
        prompt: "The flower <img><|image_1|></img> is placed in the vase which is in the middle of <img><|image_2|></img> on a wooden table of a living room",
        images: [
            Some("./imgs/test_cases/rose.jpg"),
            Some("./imgs/test_cases/vase.jpg"),
            None,
        ],
        height: Some(1024),
        width: Some(1024),
        guidance_scale: 2.5,
        img_guidance_scale: 1.6,
        seed: 66,
        max_input_image_size: 1024,
        randomize_seed: false,
        use_input_image_size_as_output: false,
    },
    // editing
    ExampleEntry {
        prompt: "<img><|image_1|><img>\n Remove the woman's earrings. Replace the mug with a clear glass filled with sparkling iced cola.",
        images: [Some("./imgs/demo_cases/t2i_woman_with_book.png"), None, None],
        height: None,
        width: None,
        guidance_scale: 2.5,
        img_guidance_scale: 1.6,
        seed: 222,
        max_input_image_size: 1024,
        randomize_seed: false,
        use_input_image_size_as_output: true,
    },
    // conditions
    ExampleEntry {
        prompt: "Detect the skeleton of human in this image: <img><|image_1|></img>.",
        images: [Some("./imgs/test_cases/control.jpg"), None, None],
        height: Some(1024),
        width: Some(1024),
        guidance_scale: 2.0,
        img_guidance_scale: 1.6,
        seed: 0,
        max_input_image_size: 1024,
        randomize_seed: false,
        use_input_image_size_as_output: true,
    },
    ExampleEntry {
        prompt: "Generate a new photo using the following picture and text as conditions: <img><|image_1|><img>\n A young boy is sitting on a sofa in the library, holding a book. His hair is neatly combed, and a faint smile plays on his lips, with a few freckles scattered across his cheeks. The library is quiet, with rows of shelves filled with books stretching out behind him.",
        images: [Some("./imgs/demo_cases/skeletal.png"), None, None],
        height: Some(1024),
        width: Some(1024),
        guidance_scale: 2.0,
        img_guidance_scale: 1.6,
        seed: 999,
        max_input_image_size: 1024,
        randomize_seed: false,
        use_input_image_size_as_output: true,
    },
    ExampleEntry {
        prompt: "Following the pose of this image <img><|image_1|><img>, generate a new photo: A young boy is sitting on a sofa in the library, holding a book. His hair is neatly combed, and a faint smile plays on his lips, with a few freckles scattered across his cheeks. The library is quiet, with rows of shelves filled with books stretching out behind him.",
        images: [Some("./imgs/demo_cases/edit.png"), None, None],
        height: Some(1024),
        width: Some(1024),
        guidance_scale: 2.0,
        img_guidance_scale: 1.6,
        seed: 123,
        max_input_image_size: 1024,
        randomize_seed: false,
        use_input_image_size_as_output: true,
    },
    ExampleEntry {
        prompt: "Following the depth mapping of this image <img><|image_1|><img>, generate a new photo: A young girl is sitting on a sofa in the library, holding a book. Her hair is neatly combed, and a faint smile plays on her lips, with a few freckles scattered across her cheeks. The library is quiet, with rows of shelves filled with books stretching out behind her.",
        images: [Some("./imgs/demo_cases/edit.png"), None, None],
        height: Some(1024),
        width: Some(1024),
        guidance_scale: 2.0,
        img_guidance_scale: 1.6,
        seed: 1,
        max_input_image_size: 1024,
        randomize_seed: false,
        use_input_image_size_as_output: true,
    },
    // grounding
    ExampleEntry {
        prompt: "<img><|image_1|></img> What item can be used to see the current time? Please highlight it in blue.",
        images: [Some("./imgs/test_cases/watch.jpg"), None, None],
        height: Some(1024),
        width: Some(1024),
        guidance_scale: 2.5,
        img_guidance_scale: 1.6,
        seed: 666,
        max_input_image_size: 1024,
        randomize_seed: false,
        use_input_image_size_as_output: true,
    },
    // in-context
    ExampleEntry {
        prompt: "According to the following examples, generate an output for the input.\nInput: <img><|image_1|></img>\nOutput: <img><|image_2|></img>\n\nInput: <img><|image_3|></img>\nOutput: ",
        images: [
            Some("./imgs/test_cases/icl1.jpg"),
            Some("./imgs/test_cases/icl2.jpg"),
            Some("./imgs/test_cases/icl3.jpg"),
        ],
        height: Some(224),
        width: Some(224),
        guidance_scale: 2.5,
        img_guidance_scale: 1.6,
        seed: 1,
        max_input_image_size: 768,
        randomize_seed: false,
        use_input_image_size_as_output: false,
    },
];

pub fn examples() -> &'static [ExampleEntry] {
    &EXAMPLES
}

pub async fn run_example(
    index: usize,
    save_images: bool,
    pipeline: &dyn ImageGenerationService,
    outputs_dir: &Path,
) -> Result<GenerationResult, ApiError> {
    let Some(example) = examples().get(index) else {
        return Err(CatalogApiError::ExampleNotFound.value());
    };

    tracing::info!(index, "running example");

    generation::service::generate_image(&example.to_request(save_images), pipeline, outputs_dir)
        .await
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::{
        catalog::models::example_entry::{
            EXAMPLE_INFERENCE_STEPS, EXAMPLE_OFFLOAD_MODEL, EXAMPLE_SEPARATE_CFG_INFER,
        },
        generation::util::placeholders::referenced_image_slots,
        pipeline::stub::StubPipeline,
    };

    use super::*;

    #[test]
    fn covers_every_input_count() {
        let counts: Vec<usize> = examples()
            .iter()
            .map(|example| example.images.iter().flatten().count())
            .collect();

        for n in 0..=3 {
            assert!(counts.contains(&n), "no example with {} images", n);
        }
    }

    #[test]
    fn placeholders_reference_supplied_slots() {
        for example in examples() {
            let supplied = example.images.iter().flatten().count();
            for slot in referenced_image_slots(example.prompt) {
                assert!(slot >= 1 && slot <= supplied, "{}", example.prompt);
            }
        }
    }

    #[test]
    fn images_fill_slots_from_the_front() {
        for example in examples() {
            let first_empty = example.images.iter().position(|image| image.is_none());
            if let Some(first_empty) = first_empty {
                assert!(example.images[first_empty..].iter().all(|image| image.is_none()));
            }
        }
    }

    #[test]
    fn missing_size_falls_back_to_default() {
        let edit = examples()
            .iter()
            .find(|example| example.height.is_none())
            .unwrap();
        let request = edit.to_request(false);

        assert_eq!((request.height, request.width), (1024, 1024));
        assert!(request.use_input_image_size_as_output);
    }

    #[tokio::test]
    async fn runs_with_fixed_execution_settings() {
        let temp = tempfile::tempdir().unwrap();
        let pipeline = StubPipeline::default();

        let result = run_example(0, false, &pipeline, temp.path()).await.unwrap();

        let calls = pipeline.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].prompt, "A curly-haired man in a red shirt is drinking tea.");
        assert!(calls[0].input_images.is_empty());
        assert_eq!(calls[0].num_inference_steps, EXAMPLE_INFERENCE_STEPS);
        assert_eq!(calls[0].separate_cfg_infer, EXAMPLE_SEPARATE_CFG_INFER);
        assert_eq!(calls[0].offload_model, EXAMPLE_OFFLOAD_MODEL);
        assert_eq!(calls[0].seed, 0);
        assert_eq!(result.saved_path, None);
    }

    #[tokio::test]
    async fn few_shot_example_forwards_three_images() {
        let temp = tempfile::tempdir().unwrap();
        let pipeline = StubPipeline::default();

        run_example(examples().len() - 1, false, &pipeline, temp.path())
            .await
            .unwrap();

        let args = &pipeline.calls()[0];
        assert_eq!(args.input_images.len(), 3);
        assert_eq!((args.height, args.width), (224, 224));
        assert_eq!(args.max_input_image_size, 768);
    }

    #[tokio::test]
    async fn unknown_index_is_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let pipeline = StubPipeline::default();

        let err = run_example(examples().len(), false, &pipeline, temp.path())
            .await
            .unwrap_err();

        assert_eq!(err.code, StatusCode::NOT_FOUND);
        assert!(pipeline.calls().is_empty());
    }
}
