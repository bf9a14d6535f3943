use super::types::{ImageUpload, StyledImage, SuggestionBundle};
use serde::{Deserialize, Serialize};

/// Coarse view of a session, derived from its [`GenerationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StylistPhase {
    Empty,
    Ready,
    InFlight,
    Complete,
    Errored,
}

/// Everything one user session knows. `Default` is the start-up state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationState {
    pub keyword: String,
    pub uploaded_image: Option<ImageUpload>,
    pub styled_result: Option<StyledImage>,
    pub suggestions: Option<SuggestionBundle>,
    pub is_in_flight: bool,
    pub last_error: Option<String>,
}

impl GenerationState {
    pub fn phase(&self) -> StylistPhase {
        if self.is_in_flight {
            StylistPhase::InFlight
        } else if self.last_error.is_some() {
            StylistPhase::Errored
        } else if self.styled_result.is_some() && self.suggestions.is_some() {
            StylistPhase::Complete
        } else if self.uploaded_image.is_some() {
            StylistPhase::Ready
        } else {
            StylistPhase::Empty
        }
    }

    /// Whether the primary action is enabled.
    pub fn can_generate(&self) -> bool {
        self.uploaded_image.is_some() && !self.keyword.trim().is_empty() && !self.is_in_flight
    }

    pub fn clear_results(&mut self) {
        self.styled_result = None;
        self.suggestions = None;
    }

    pub(crate) fn begin_attempt(&mut self) {
        self.is_in_flight = true;
        self.last_error = None;
        self.clear_results();
    }

    pub(crate) fn complete(&mut self, styled: StyledImage, suggestions: SuggestionBundle) {
        self.styled_result = Some(styled);
        self.suggestions = Some(suggestions);
        self.is_in_flight = false;
        self.last_error = None;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.clear_results();
        self.is_in_flight = false;
        self.last_error = Some(message);
    }
}
