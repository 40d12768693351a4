use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use image::{DynamicImage, ImageFormat};

use crate::{
    app::{models::api_error::ApiError, util::time},
    generation::errors::GenerationApiError,
};

pub fn output_file_name(now: &DateTime<Local>) -> String {
    format!("{}.png", time::file_name_timestamp(now))
}

/// Writes `image` as `<dir>/<timestamp>.png`, creating `dir` if needed.
/// A file saved earlier within the same second is overwritten.
pub fn save_image(
    image: &DynamicImage,
    dir: &Path,
    now: &DateTime<Local>,
) -> Result<PathBuf, ApiError> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        tracing::error!(%e, dir = %dir.display(), "failed to create outputs dir");
        return Err(GenerationApiError::SaveFailed.value());
    }

    let path = dir.join(output_file_name(now));
    match image.save_with_format(&path, ImageFormat::Png) {
        Ok(_) => {
            tracing::info!(path = %path.display(), "saved generated image");
            Ok(path)
        }
        Err(e) => {
            tracing::error!(%e, path = %path.display(), "failed to save generated image");
            Err(GenerationApiError::SaveFailed.value())
        }
    }
}
