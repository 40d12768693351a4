use std::collections::HashMap;

use bytes::Bytes;
use mime::Mime;

#[derive(Debug)]
pub struct FileProperties {
    pub id: String,
    pub field_name: String,
    pub file_name: String,
    pub mime_type: Mime,
    pub data: Bytes,
}

impl FileProperties {
    pub fn extension(&self) -> &str {
        match self.mime_type.subtype().as_str() {
            "jpeg" => "jpg",
            "png" => "png",
            "webp" => "webp",
            "gif" => "gif",
            _ => self
                .file_name
                .rsplit_once('.')
                .map(|(_, ext)| ext)
                .unwrap_or("bin"),
        }
    }
}

#[derive(Debug, Default)]
pub struct FormParts {
    pub files: Vec<FileProperties>,
    pub fields: HashMap<String, String>,
}
