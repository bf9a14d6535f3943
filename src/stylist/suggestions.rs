use super::types::SuggestionBundle;
use crate::{
    Error, Result,
    error::SUGGESTIONS_FAILED,
    llm::{Content, GenerateContentRequest, GenerationConfig, LlmClient, Part},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

/// Asks the text model for a caption, hashtags and related style keywords.
#[derive(Clone)]
pub struct SuggestionGenerator {
    client: Arc<dyn LlmClient>,
    model: String,
}

pub fn build_suggestion_prompt(keyword: &str) -> String {
    format!(
        "Based on the photo editing keyword \"{keyword}\", generate creative suggestions. Provide \
         a short, catchy caption suggestion. Provide 3 relevant and trending hashtags (without the \
         # symbol). Provide 5 related, trending prompt keywords for re-edits. The related prompts \
         should be based on global visual trends."
    )
}

pub fn suggestion_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "caption": {
                "type": "STRING",
                "description": "A short, catchy caption suggestion."
            },
            "hashtags": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "An array of 3 relevant and trending hashtags."
            },
            "relatedPrompts": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "An array of 5 related, trending prompt keywords for re-edits."
            }
        },
        "required": ["caption", "hashtags", "relatedPrompts"]
    })
}

/// Parses the model's JSON text. Checks shape only: a non-empty caption and
/// two string arrays. Element counts are not enforced. Array elements must be
/// strings; a number or object inside `hashtags` rejects the whole bundle.
pub fn parse_suggestions(text: &str) -> Result<SuggestionBundle> {
    let parsed = serde_json::from_str::<SuggestionBundle>(text.trim())
        .map_err(|e| e.to_string())
        .and_then(|bundle| {
            if bundle.caption.is_empty() {
                Err("caption is empty".to_string())
            } else {
                Ok(bundle)
            }
        });

    parsed.map_err(|reason| {
        warn!("Failed to parse suggestions JSON: {}", reason);
        Error::suggestion(SUGGESTIONS_FAILED)
    })
}

impl SuggestionGenerator {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn build_request(keyword: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(build_suggestion_prompt(
                keyword,
            ))])],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(suggestion_schema()),
                ..Default::default()
            }),
        }
    }

    pub async fn suggest(&self, keyword: &str) -> Result<SuggestionBundle> {
        debug!("Requesting suggestions for '{}'", keyword);

        let response = self
            .client
            .generate_content(&self.model, Self::build_request(keyword))
            .await?;

        let bundle = parse_suggestions(&response.text())?;
        debug!(
            "Received {} hashtags and {} related prompts for '{}'",
            bundle.hashtags.len(),
            bundle.related_prompts.len(),
            keyword
        );
        Ok(bundle)
    }
}
