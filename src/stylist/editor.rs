use super::types::{StyleRequest, StyledImage};
use crate::{
    Error, Result,
    error::GENERATION_FAILED,
    llm::{Content, GenerateContentRequest, GenerationConfig, LlmClient, Modality, Part},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Sends the uploaded photo and a style keyword to the image-editing model.
#[derive(Clone)]
pub struct StyleEditor {
    client: Arc<dyn LlmClient>,
    model: String,
}

pub fn build_edit_prompt(keyword: &str) -> String {
    format!(
        "Apply a \"{keyword}\" aesthetic to this photo. Keep the same face, identity, and general \
         appearance consistent with the uploaded image. The output must be a visually stunning, \
         cinematic, and modern image that looks natural yet artistically enhanced, suitable for \
         social media."
    )
}

impl StyleEditor {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn build_request(request: &StyleRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::inline_data(&request.media_type, &request.image_base64),
                Part::text(build_edit_prompt(&request.keyword)),
            ])],
            generation_config: Some(GenerationConfig {
                response_modalities: vec![Modality::Image],
                ..Default::default()
            }),
        }
    }

    /// Only the first part of the first candidate is inspected; anything
    /// other than inline image data there is a generation failure.
    pub async fn edit(&self, request: &StyleRequest) -> Result<StyledImage> {
        debug!(
            "Requesting '{}' edit of {} image ({} bytes b64)",
            request.keyword,
            request.media_type,
            request.image_base64.len()
        );

        let response = self
            .client
            .generate_content(&self.model, Self::build_request(request))
            .await?;

        match response.first_part().and_then(|part| part.inline_data.as_ref()) {
            Some(inline) if !inline.data.is_empty() => {
                debug!(
                    "Received styled {} image ({} bytes b64)",
                    inline.mime_type,
                    inline.data.len()
                );
                Ok(StyledImage::new(&inline.mime_type, &inline.data))
            }
            _ => {
                warn!(
                    "Model {} returned no image in its first part for '{}'",
                    self.model, request.keyword
                );
                Err(Error::generation(GENERATION_FAILED))
            }
        }
    }
}
