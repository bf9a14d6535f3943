use crate::stylist::{GenerationState, StylistPhase, SuggestionBundle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct KeywordRequest {
    pub keyword: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub keyword: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectSuggestionRequest {
    pub suggestion: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionsView {
    pub caption: String,
    pub hashtags: Vec<String>,
    pub related_prompts: Vec<String>,
    pub formatted_hashtags: String,
}

/// What the front-end needs to render a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub phase: StylistPhase,
    pub keyword: String,
    pub has_image: bool,
    #[serde(default)]
    pub image_media_type: Option<String>,
    #[serde(default)]
    pub image_file_name: Option<String>,
    pub can_generate: bool,
    pub is_in_flight: bool,
    /// Data URI of the styled photo.
    #[serde(default)]
    pub styled_image: Option<String>,
    /// When the remote service produced the styled photo.
    #[serde(default)]
    pub styled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub suggestions: Option<SuggestionsView>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl From<&SuggestionBundle> for SuggestionsView {
    fn from(bundle: &SuggestionBundle) -> Self {
        Self {
            caption: bundle.caption.clone(),
            hashtags: bundle.hashtags.clone(),
            related_prompts: bundle.related_prompts.clone(),
            formatted_hashtags: bundle.formatted_hashtags(),
        }
    }
}

impl SessionSnapshot {
    pub fn new(session_id: Uuid, state: &GenerationState) -> Self {
        let image = state.uploaded_image.as_ref();
        Self {
            session_id,
            phase: state.phase(),
            keyword: state.keyword.clone(),
            has_image: image.is_some(),
            image_media_type: image.map(|i| i.media_type.clone()),
            image_file_name: image.and_then(|i| i.file_name.clone()),
            can_generate: state.can_generate(),
            is_in_flight: state.is_in_flight,
            styled_image: state.styled_result.as_ref().map(|s| s.data_uri()),
            styled_at: state.styled_result.as_ref().map(|s| s.generated_at),
            suggestions: state.suggestions.as_ref().map(SuggestionsView::from),
            error: state.last_error.clone(),
        }
    }
}
