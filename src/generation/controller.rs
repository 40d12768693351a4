use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use image::ImageFormat;
use validator::Validate;

use crate::{
    app::{
        models::{api_error::ApiError, json_from_request::JsonFromRequest},
        util::multipart::{models::file_properties::FileProperties, multipart::get_form_parts},
    },
    AppState,
};

use super::{
    dtos::generate_image_dto::GenerateImageDto,
    errors::GenerationApiError,
    models::{generate_image_response::GenerateImageResponse, generation_result::GenerationResult},
    service,
};

pub const X_SEED: &str = "x-seed";
pub const X_SAVED_PATH: &str = "x-saved-path";

const IMAGE_FIELDS: [&str; 3] = ["image_1", "image_2", "image_3"];

pub async fn generate_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let parts = get_form_parts(multipart).await?;
    let mut dto = GenerateImageDto::from_form(&parts.fields)?;
    dto.validate()?;

    let uploads = store_uploads(&parts.files, &state.envy.uploads_dir()).await?;
    for (slot, path) in &uploads {
        dto.set_image_slot(*slot, path.display().to_string());
    }

    let result = service::generate_image(
        &dto.to_request(),
        state.pipeline.as_ref(),
        &state.envy.outputs_dir(),
    )
    .await;

    remove_uploads(&uploads).await;

    image_response(&result?)
}

pub async fn generate_image_json(
    State(state): State<AppState>,
    JsonFromRequest(dto): JsonFromRequest<GenerateImageDto>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    dto.validate()?;

    let result = service::generate_image(
        &dto.to_request(),
        state.pipeline.as_ref(),
        &state.envy.outputs_dir(),
    )
    .await?;

    let png = encode_png(&result)?;
    Ok(Json(GenerateImageResponse::new(&result, &png)))
}

pub fn image_response(result: &GenerationResult) -> Result<Response, ApiError> {
    let png = encode_png(result)?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    headers.insert(X_SEED, HeaderValue::from(result.seed));
    if let Some(path) = &result.saved_path {
        if let Ok(value) = HeaderValue::from_str(&path.display().to_string()) {
            headers.insert(X_SAVED_PATH, value);
        }
    }

    Ok((headers, png).into_response())
}

fn encode_png(result: &GenerationResult) -> Result<Vec<u8>, ApiError> {
    let mut png = Vec::new();
    match result
        .image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
    {
        Ok(_) => Ok(png),
        Err(e) => {
            tracing::error!(%e, "failed to encode generated image");
            Err(GenerationApiError::EncodeFailed.value())
        }
    }
}

/// Writes uploaded `image_N` files to disk and returns their slots and paths.
async fn store_uploads(
    files: &[FileProperties],
    dir: &Path,
) -> Result<Vec<(usize, PathBuf)>, ApiError> {
    let mut uploads = Vec::new();

    for file in files {
        let Some(slot) = IMAGE_FIELDS
            .iter()
            .position(|name| *name == file.field_name)
            .map(|index| index + 1)
        else {
            continue;
        };

        if file.mime_type.type_() != mime::IMAGE || imagesize::blob_size(&file.data).is_err() {
            remove_uploads(&uploads).await;
            return Err(GenerationApiError::InvalidImageUpload.value());
        }

        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            tracing::error!(%e, dir = %dir.display(), "failed to create uploads dir");
            remove_uploads(&uploads).await;
            return Err(GenerationApiError::UploadFailed.value());
        }

        let path = dir.join(format!("{}.{}", file.id, file.extension()));
        if let Err(e) = tokio::fs::write(&path, &file.data).await {
            tracing::error!(%e, path = %path.display(), "failed to store upload");
            remove_uploads(&uploads).await;
            return Err(GenerationApiError::UploadFailed.value());
        }

        uploads.push((slot, path));
    }

    Ok(uploads)
}

async fn remove_uploads(uploads: &[(usize, PathBuf)]) {
    for (_, path) in uploads {
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!(%e, path = %path.display(), "failed to remove upload");
        }
    }
}
