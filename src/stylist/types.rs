use super::encoder;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The photo the user uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub media_type: String,
    pub file_name: Option<String>,
}

/// Inputs of one generation attempt. Built fresh each time.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRequest {
    pub image_base64: String,
    pub media_type: String,
    pub keyword: String,
}

/// The edited photo returned by the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledImage {
    pub media_type: String,
    /// Base64 payload, without any data URI prefix.
    pub data: String,
    pub generated_at: DateTime<Utc>,
}

/// Caption, hashtags and related keywords for a style keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionBundle {
    pub caption: String,
    pub hashtags: Vec<String>,
    pub related_prompts: Vec<String>,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Result<Self> {
        let media_type = media_type.into().trim().to_ascii_lowercase();

        if !media_type.starts_with("image/") {
            return Err(Error::validation("Only image files can be uploaded."));
        }
        if bytes.is_empty() {
            return Err(Error::validation("Uploaded image is empty."));
        }

        Ok(Self {
            bytes,
            media_type,
            file_name: None,
        })
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Loads an image from disk, guessing the media type from the extension.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let media_type = media_type_for_path(path)
            .ok_or_else(|| Error::validation("Only image files can be uploaded."))?;
        let bytes = tokio::fs::read(path).await?;

        let upload = Self::new(bytes, media_type)?;
        Ok(match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => upload.with_file_name(name),
            None => upload,
        })
    }

    pub fn to_style_request(&self, keyword: &str) -> StyleRequest {
        StyleRequest {
            image_base64: encoder::encode_bytes(&self.bytes),
            media_type: self.media_type.clone(),
            keyword: keyword.to_string(),
        }
    }
}

fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

impl StyledImage {
    pub fn new(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            data: data.into(),
            generated_at: Utc::now(),
        }
    }

    /// Self-contained reference a browser can display directly.
    pub fn data_uri(&self) -> String {
        encoder::to_data_uri(&self.media_type, &self.data)
    }

    pub fn bytes(&self) -> Result<Vec<u8>> {
        encoder::decode(&self.data)
    }
}

impl SuggestionBundle {
    /// Hashtags as shown to the user: `#a #b #c`.
    pub fn formatted_hashtags(&self) -> String {
        self.hashtags
            .iter()
            .map(|tag| format!("#{}", tag))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_upload_rejects_non_images() {
        let err = ImageUpload::new(b"%PDF".to_vec(), "application/pdf").unwrap_err();
        assert_eq!(err.user_message(), "Only image files can be uploaded.");
    }

    #[test]
    fn test_upload_rejects_empty_payload() {
        let err = ImageUpload::new(Vec::new(), "image/png").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_upload_normalizes_media_type() {
        let upload = ImageUpload::new(vec![1, 2, 3], " Image/JPEG ").unwrap();
        assert_eq!(upload.media_type, "image/jpeg");
    }

    #[test]
    fn test_style_request_carries_encoded_image() {
        let upload = ImageUpload::new(b"hello".to_vec(), "image/png").unwrap();
        let request = upload.to_style_request("royal");

        assert_eq!(request.image_base64, "aGVsbG8=");
        assert_eq!(request.media_type, "image/png");
        assert_eq!(request.keyword, "royal");
    }

    #[tokio::test]
    async fn test_from_file_guesses_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portrait.JPG");
        tokio::fs::write(&path, [0xff, 0xd8, 0xff]).await.unwrap();

        let upload = ImageUpload::from_file(&path).await.unwrap();
        assert_eq!(upload.media_type, "image/jpeg");
        assert_eq!(upload.file_name.as_deref(), Some("portrait.JPG"));
        assert_eq!(upload.bytes, vec![0xff, 0xd8, 0xff]);
    }

    #[test]
    fn test_styled_image_data_uri() {
        let image = StyledImage::new("image/png", "QUJD");
        assert_eq!(image.data_uri(), "data:image/png;base64,QUJD");
        assert_eq!(image.bytes().unwrap(), b"ABC");
    }

    #[test]
    fn test_formatted_hashtags() {
        let bundle = SuggestionBundle {
            caption: "Golden hour glow".to_string(),
            hashtags: vec!["vintage".into(), "filmlook".into(), "retro".into()],
            related_prompts: vec![],
        };
        assert_eq!(bundle.formatted_hashtags(), "#vintage #filmlook #retro");
    }
}
