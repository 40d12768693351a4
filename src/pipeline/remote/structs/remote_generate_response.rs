use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RemoteGenerateResponse {
    /// Base64 encoded PNGs.
    pub images: Vec<String>,
}
