use std::{collections::HashMap, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    app::models::api_error::ApiError,
    generation::{errors::GenerationApiError, models::generation_request::GenerationRequest},
};

pub const DEFAULT_SIZE: u32 = 1024;
pub const DEFAULT_GUIDANCE_SCALE: f32 = 2.5;
pub const DEFAULT_IMG_GUIDANCE_SCALE: f32 = 1.6;
pub const DEFAULT_INFERENCE_STEPS: u32 = 50;
pub const DEFAULT_SEED: u32 = 42;
pub const SIZE_STEP: u32 = 16;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_size_steps", skip_on_field_errors = false))]
pub struct GenerateImageDto {
    #[serde(default)]
    pub prompt: String,
    pub image_1: Option<String>,
    pub image_2: Option<String>,
    pub image_3: Option<String>,
    #[serde(default = "default_size")]
    #[validate(range(min = 128, max = 2048, message = "height must be between 128 and 2048."))]
    pub height: u32,
    #[serde(default = "default_size")]
    #[validate(range(min = 128, max = 2048, message = "width must be between 128 and 2048."))]
    pub width: u32,
    #[serde(default = "default_guidance_scale")]
    #[validate(range(min = 1.0, max = 5.0, message = "guidance_scale must be between 1.0 and 5.0."))]
    pub guidance_scale: f32,
    #[serde(default = "default_img_guidance_scale")]
    #[validate(range(
        min = 1.0,
        max = 2.0,
        message = "img_guidance_scale must be between 1.0 and 2.0."
    ))]
    pub img_guidance_scale: f32,
    #[serde(default = "default_inference_steps")]
    #[validate(range(min = 1, max = 100, message = "inference_steps must be between 1 and 100."))]
    pub inference_steps: u32,
    #[serde(default = "default_seed")]
    #[validate(range(max = 2147483647, message = "seed must be at most 2147483647."))]
    pub seed: u32,
    #[serde(default = "default_true")]
    pub separate_cfg_infer: bool,
    #[serde(default)]
    pub offload_model: bool,
    #[serde(default)]
    pub use_input_image_size_as_output: bool,
    #[serde(default = "default_size")]
    #[validate(range(
        min = 128,
        max = 2048,
        message = "max_input_image_size must be between 128 and 2048."
    ))]
    pub max_input_image_size: u32,
    #[serde(default = "default_true")]
    pub randomize_seed: bool,
    #[serde(default)]
    pub save_images: bool,
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

fn default_guidance_scale() -> f32 {
    DEFAULT_GUIDANCE_SCALE
}

fn default_img_guidance_scale() -> f32 {
    DEFAULT_IMG_GUIDANCE_SCALE
}

fn default_inference_steps() -> u32 {
    DEFAULT_INFERENCE_STEPS
}

fn default_seed() -> u32 {
    DEFAULT_SEED
}

fn default_true() -> bool {
    true
}

fn validate_size_steps(dto: &GenerateImageDto) -> Result<(), ValidationError> {
    let sizes = [dto.height, dto.width, dto.max_input_image_size];
    if sizes.iter().any(|size| size % SIZE_STEP != 0) {
        let mut e = ValidationError::new("validate_size_steps");
        e.message = Some("sizes must be multiples of 16.".into());
        return Err(e);
    }

    Ok(())
}

impl GenerateImageDto {
    /// Reads the HTML form. Unchecked checkboxes are not submitted, so absent
    /// flags are `false`; absent numbers take the slider defaults.
    pub fn from_form(fields: &HashMap<String, String>) -> Result<Self, ApiError> {
        Ok(Self {
            prompt: fields.get("prompt").cloned().unwrap_or_default(),
            image_1: None,
            image_2: None,
            image_3: None,
            height: parse_field(fields, "height", DEFAULT_SIZE)?,
            width: parse_field(fields, "width", DEFAULT_SIZE)?,
            guidance_scale: parse_field(fields, "guidance_scale", DEFAULT_GUIDANCE_SCALE)?,
            img_guidance_scale: parse_field(
                fields,
                "img_guidance_scale",
                DEFAULT_IMG_GUIDANCE_SCALE,
            )?,
            inference_steps: parse_field(fields, "inference_steps", DEFAULT_INFERENCE_STEPS)?,
            seed: parse_field(fields, "seed", DEFAULT_SEED)?,
            separate_cfg_infer: checkbox(fields, "separate_cfg_infer"),
            offload_model: checkbox(fields, "offload_model"),
            use_input_image_size_as_output: checkbox(fields, "use_input_image_size_as_output"),
            max_input_image_size: parse_field(fields, "max_input_image_size", DEFAULT_SIZE)?,
            randomize_seed: checkbox(fields, "randomize_seed"),
            save_images: checkbox(fields, "save_images"),
        })
    }

    pub fn set_image_slot(&mut self, slot: usize, path: String) {
        match slot {
            1 => self.image_1 = Some(path),
            2 => self.image_2 = Some(path),
            3 => self.image_3 = Some(path),
            _ => {}
        }
    }

    pub fn to_request(&self) -> GenerationRequest {
        let slot = |path: &Option<String>| match path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => None,
        };

        GenerationRequest {
            prompt: self.prompt.to_string(),
            input_images: [slot(&self.image_1), slot(&self.image_2), slot(&self.image_3)],
            height: self.height,
            width: self.width,
            guidance_scale: self.guidance_scale,
            img_guidance_scale: self.img_guidance_scale,
            inference_steps: self.inference_steps,
            seed: self.seed,
            separate_cfg_infer: self.separate_cfg_infer,
            offload_model: self.offload_model,
            use_input_image_size_as_output: self.use_input_image_size_as_output,
            max_input_image_size: self.max_input_image_size,
            randomize_seed: self.randomize_seed,
            save_images: self.save_images,
        }
    }
}

fn parse_field<T: FromStr>(
    fields: &HashMap<String, String>,
    name: &'static str,
    default: T,
) -> Result<T, ApiError> {
    match fields.get(name).map(|value| value.trim()) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| GenerationApiError::InvalidFormField(name).value()),
    }
}

fn checkbox(fields: &HashMap<String, String>, name: &str) -> bool {
    matches!(
        fields.get(name).map(|value| value.trim()),
        Some("on") | Some("true") | Some("1")
    )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn json_defaults_match_form_sliders() {
        let dto: GenerateImageDto =
            serde_json::from_str(r#"{"prompt": "A curly-haired man in a red shirt is drinking tea."}"#)
                .unwrap();

        assert_eq!(dto.height, 1024);
        assert_eq!(dto.width, 1024);
        assert_eq!(dto.guidance_scale, 2.5);
        assert_eq!(dto.img_guidance_scale, 1.6);
        assert_eq!(dto.inference_steps, 50);
        assert_eq!(dto.seed, 42);
        assert!(dto.randomize_seed);
        assert!(dto.separate_cfg_infer);
        assert!(!dto.offload_model);
        assert!(!dto.use_input_image_size_as_output);
        assert!(!dto.save_images);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_sliders() {
        let mut dto: GenerateImageDto = serde_json::from_str("{}").unwrap();
        dto.guidance_scale = 6.0;
        assert!(dto.validate().is_err());

        let mut dto: GenerateImageDto = serde_json::from_str("{}").unwrap();
        dto.inference_steps = 0;
        assert!(dto.validate().is_err());

        let mut dto: GenerateImageDto = serde_json::from_str("{}").unwrap();
        dto.seed = 2147483648;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_sizes_off_the_slider_step() {
        let mut dto: GenerateImageDto = serde_json::from_str("{}").unwrap();
        dto.width = 1000;
        assert!(dto.validate().is_err());

        dto.width = 224;
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn form_checkboxes_default_to_off() {
        let dto = GenerateImageDto::from_form(&form(&[("prompt", "a cat"), ("save_images", "on")]))
            .unwrap();

        assert!(dto.save_images);
        assert!(!dto.randomize_seed);
        assert!(!dto.separate_cfg_infer);
        assert_eq!(dto.height, 1024);
    }

    #[test]
    fn form_rejects_non_numeric_values() {
        let err = GenerateImageDto::from_form(&form(&[("height", "tall")])).unwrap_err();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
        assert!(err.message.starts_with("height"));
    }

    #[test]
    fn blank_image_paths_become_empty_slots() {
        let mut dto: GenerateImageDto = serde_json::from_str(
            r#"{"prompt": "p", "image_1": "  ", "image_3": "./imgs/test_cases/icl3.jpg"}"#,
        )
        .unwrap();
        dto.set_image_slot(2, "./imgs/test_cases/icl2.jpg".to_string());

        let request = dto.to_request();
        assert_eq!(
            request.input_images,
            [
                None,
                Some(PathBuf::from("./imgs/test_cases/icl2.jpg")),
                Some(PathBuf::from("./imgs/test_cases/icl3.jpg")),
            ]
        );
    }
}
