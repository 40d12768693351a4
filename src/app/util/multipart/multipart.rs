use axum::{extract::Multipart, http::StatusCode};
use uuid::Uuid;

use crate::app::models::api_error::ApiError;

use super::models::file_properties::{FileProperties, FormParts};

/// Splits a multipart form into file parts and plain text fields.
/// File inputs the user left empty arrive without bytes and are skipped.
pub async fn get_form_parts(mut multipart: Multipart) -> Result<FormParts, ApiError> {
    let mut parts = FormParts::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(%e, "failed to read multipart field");
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: "Malformed form data.".to_string(),
                });
            }
        };

        let field_name = field.name().unwrap_or("file").to_string();

        let Some(file_name) = field.file_name().map(|s| s.to_string()) else {
            let Ok(text) = field.text().await else {
                continue;
            };
            parts.fields.insert(field_name, text);
            continue;
        };

        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);
        let Ok(data) = field.bytes().await else {
            continue;
        };
        if data.is_empty() {
            continue;
        }

        parts.files.push(FileProperties {
            id: Uuid::new_v4().to_string(),
            field_name,
            file_name,
            mime_type,
            data,
        });
    }

    Ok(parts)
}
