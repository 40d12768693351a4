use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 7860;
pub const DEFAULT_MODEL_CHECKPOINT: &str = "Shitao/OmniGen-v1";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    pub port: Option<u16>,

    pub model_checkpoint: Option<String>,
    pub pipeline_url: String,
    pub pipeline_api_key: Option<String>,

    pub outputs_dir: Option<String>,
    pub uploads_dir: Option<String>,
    pub max_upload_bytes: Option<usize>,
}

impl Envy {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn model_checkpoint(&self) -> &str {
        self.model_checkpoint
            .as_deref()
            .unwrap_or(DEFAULT_MODEL_CHECKPOINT)
    }

    pub fn outputs_dir(&self) -> PathBuf {
        PathBuf::from(self.outputs_dir.as_deref().unwrap_or("outputs"))
    }

    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(self.uploads_dir.as_deref().unwrap_or("uploads"))
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }
}
