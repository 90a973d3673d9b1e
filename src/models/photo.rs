use bytes::Bytes;
use mime::Mime;
use std::path::Path;

/// Photo file picked in a form, uploaded as a multipart file part
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: Mime,
    pub bytes: Bytes,
}

impl PhotoUpload {
    pub fn new(file_name: impl Into<String>, content_type: Mime, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Read a photo from disk, guessing the content type from the extension
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());

        Ok(Self::new(file_name, content_type_for(path), bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn content_type_for(path: &Path) -> Mime {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "png" => mime::IMAGE_PNG,
        "gif" => mime::IMAGE_GIF,
        "bmp" => mime::IMAGE_BMP,
        "svg" => mime::IMAGE_SVG,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
