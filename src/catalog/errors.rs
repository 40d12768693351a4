use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum CatalogApiError {
    ExampleNotFound,
}

impl CatalogApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::ExampleNotFound => ApiError {
                code: StatusCode::NOT_FOUND,
                message: "Example not found.".to_string(),
            },
        }
    }
}
