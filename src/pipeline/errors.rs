use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum PipelineApiError {
    Unreachable,
    BadStatus(u16),
    BadResponse,
    InputImageUnreadable(String),
    OutputImageUndecodable,
}

impl PipelineApiError {
    pub fn value(&self) -> ApiError {
        match self {
            Self::Unreachable => ApiError {
                code: StatusCode::BAD_GATEWAY,
                message: "Could not reach the image generation pipeline.".to_string(),
            },
            Self::BadStatus(status) => ApiError {
                code: StatusCode::BAD_GATEWAY,
                message: format!("Image generation pipeline failed with status {}.", status),
            },
            Self::BadResponse => ApiError {
                code: StatusCode::BAD_GATEWAY,
                message: "Image generation pipeline returned an unexpected response.".to_string(),
            },
            Self::InputImageUnreadable(path) => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: format!("Could not read input image {}.", path),
            },
            Self::OutputImageUndecodable => ApiError {
                code: StatusCode::BAD_GATEWAY,
                message: "Could not decode generated image.".to_string(),
            },
        }
    }
}
