use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum GenerationApiError {
    NoImageGenerated,
    SaveFailed,
    EncodeFailed,
    UploadFailed,
    InvalidImageUpload,
    InvalidFormField(&'static str),
}

impl GenerationApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::NoImageGenerated => ApiError {
                code: StatusCode::BAD_GATEWAY,
                message: "The pipeline generated no images.".to_string(),
            },
            Self::SaveFailed => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to save generated image.".to_string(),
            },
            Self::EncodeFailed => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to encode generated image.".to_string(),
            },
            Self::UploadFailed => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to store uploaded image.".to_string(),
            },
            Self::InvalidImageUpload => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Input images must be of type image.".to_string(),
            },
            Self::InvalidFormField(name) => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: format!("{} has an invalid value.", name),
            },
        }
    }
}
