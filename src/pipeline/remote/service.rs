use async_trait::async_trait;
use image::DynamicImage;
use reqwest::header;

use crate::{
    app::models::api_error::ApiError,
    generation::models::pipeline_args::PipelineArgs,
    pipeline::{errors::PipelineApiError, ImageGenerationService},
};

use super::{models::input_spec::InputSpec, structs::remote_generate_response::RemoteGenerateResponse};

/// A checkpoint served by a remote inference server.
pub struct RemotePipeline {
    client: reqwest::Client,
    base_url: String,
    checkpoint: String,
    api_key: Option<String>,
}

impl RemotePipeline {
    pub fn from_pretrained(base_url: &str, checkpoint: &str, api_key: Option<String>) -> Self {
        tracing::info!(checkpoint, base_url, "using remote pipeline");

        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            checkpoint: checkpoint.to_string(),
            api_key,
        }
    }

    pub fn checkpoint(&self) -> &str {
        &self.checkpoint
    }

    fn generate_url(&self) -> String {
        format!("{}/generate", self.base_url)
    }
}

#[async_trait]
impl ImageGenerationService for RemotePipeline {
    async fn generate(&self, args: &PipelineArgs) -> Result<Vec<DynamicImage>, ApiError> {
        let mut input_images = Vec::with_capacity(args.input_images.len());
        for path in &args.input_images {
            match tokio::fs::read(path).await {
                Ok(bytes) => input_images.push(base64::encode(bytes)),
                Err(e) => {
                    tracing::error!(%e, path = %path.display(), "failed to read input image");
                    return Err(
                        PipelineApiError::InputImageUnreadable(path.display().to_string()).value(),
                    );
                }
            }
        }

        let input_spec = InputSpec::new(&self.checkpoint, args, input_images);

        let mut request = self
            .client
            .post(self.generate_url())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&input_spec);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let res = match request.send().await {
            Ok(res) => res,
            Err(e) => {
                tracing::error!(%e, "failed to call pipeline");
                return Err(PipelineApiError::Unreachable.value());
            }
        };

        if !res.status().is_success() {
            let status = res.status().as_u16();
            tracing::error!(status, "pipeline returned error status");
            return Err(PipelineApiError::BadStatus(status).value());
        }

        let body = match res.json::<RemoteGenerateResponse>().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(%e, "failed to parse pipeline response");
                return Err(PipelineApiError::BadResponse.value());
            }
        };

        body.images.iter().map(|image| decode_image(image)).collect()
    }
}

fn decode_image(base64_image: &str) -> Result<DynamicImage, ApiError> {
    let Ok(bytes) = base64::decode(base64_image) else {
        return Err(PipelineApiError::OutputImageUndecodable.value());
    };

    match image::load_from_memory(&bytes) {
        Ok(image) => Ok(image),
        Err(e) => {
            tracing::error!(%e, "failed to decode generated image");
            Err(PipelineApiError::OutputImageUndecodable.value())
        }
    }
}
