use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct RunExampleDto {
    #[serde(default)]
    pub save_images: bool,
}
