use super::{
    editor::StyleEditor,
    state::{GenerationState, StylistPhase},
    suggestions::SuggestionGenerator,
    types::{ImageUpload, StyledImage, SuggestionBundle},
};
use crate::{
    Error, Result,
    config::LlmConfig,
    error::VALIDATION_MISSING_INPUT,
    llm::LlmClient,
};
use std::sync::Arc;
use tokio::{sync::Mutex, task::JoinError};
use tracing::{debug, error, info, warn};

struct Inner {
    state: GenerationState,
    // Bumped by every generate, reset and upload; a settling attempt only
    // writes back if its token is still current.
    attempt: u64,
}

/// Owns one user's [`GenerationState`] and runs generation attempts.
pub struct Stylist {
    editor: StyleEditor,
    suggestions: SuggestionGenerator,
    inner: Mutex<Inner>,
}

fn flatten<T>(joined: std::result::Result<Result<T>, JoinError>) -> Result<T> {
    joined.unwrap_or_else(|e| Err(Error::internal(format!("request task failed: {}", e))))
}

impl Stylist {
    pub fn new(client: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self::with_requesters(
            StyleEditor::new(client.clone(), &config.image_model),
            SuggestionGenerator::new(client, &config.text_model),
        )
    }

    pub fn with_requesters(editor: StyleEditor, suggestions: SuggestionGenerator) -> Self {
        Self {
            editor,
            suggestions,
            inner: Mutex::new(Inner {
                state: GenerationState::default(),
                attempt: 0,
            }),
        }
    }

    pub async fn snapshot(&self) -> GenerationState {
        self.inner.lock().await.state.clone()
    }

    pub async fn phase(&self) -> StylistPhase {
        self.inner.lock().await.state.phase()
    }

    pub async fn can_generate(&self) -> bool {
        self.inner.lock().await.state.can_generate()
    }

    /// Replaces the uploaded photo and drops everything derived from the old one.
    pub async fn set_image(&self, image: ImageUpload) -> GenerationState {
        let mut inner = self.inner.lock().await;
        info!(
            "Image uploaded: {} ({} bytes)",
            image.media_type,
            image.bytes.len()
        );
        inner.attempt += 1;
        inner.state.uploaded_image = Some(image);
        inner.state.clear_results();
        inner.state.is_in_flight = false;
        inner.state.last_error = None;
        inner.state.clone()
    }

    pub async fn set_keyword(&self, keyword: &str) -> GenerationState {
        let mut inner = self.inner.lock().await;
        inner.state.keyword = keyword.to_string();
        inner.state.clone()
    }

    pub async fn dismiss_error(&self) -> GenerationState {
        let mut inner = self.inner.lock().await;
        inner.state.last_error = None;
        inner.state.clone()
    }

    pub async fn reset(&self) -> GenerationState {
        let mut inner = self.inner.lock().await;
        debug!("Resetting session at attempt {}", inner.attempt);
        inner.attempt += 1;
        inner.state = GenerationState::default();
        inner.state.clone()
    }

    /// Sets the keyword to the picked suggestion and generates with it.
    pub async fn select_suggestion(&self, suggestion: &str) -> GenerationState {
        self.set_keyword(suggestion).await;
        self.generate(suggestion).await
    }

    /// Runs one generation attempt and returns the state after it settles.
    ///
    /// Both remote calls are issued together and joined; the attempt succeeds
    /// only if both do. Failures land in `last_error`, never in the return
    /// type.
    pub async fn generate(&self, keyword: &str) -> GenerationState {
        let keyword = keyword.trim().to_string();

        let (token, image) = {
            let mut inner = self.inner.lock().await;
            let image = inner
                .state
                .uploaded_image
                .clone()
                .filter(|_| !keyword.is_empty());
            let Some(image) = image else {
                warn!("Generate rejected: image or keyword missing");
                inner.state.last_error = Some(VALIDATION_MISSING_INPUT.to_string());
                return inner.state.clone();
            };
            inner.attempt += 1;
            inner.state.begin_attempt();
            (inner.attempt, image)
        };

        info!("Starting generation attempt {} for '{}'", token, keyword);

        let outcome = self.run_requests(&image, &keyword).await;

        let mut inner = self.inner.lock().await;
        if inner.attempt != token {
            debug!(
                "Discarding attempt {} result, session moved on to {}",
                token, inner.attempt
            );
            return inner.state.clone();
        }

        match outcome {
            Ok((styled, suggestions)) => {
                info!("Generation attempt {} completed", token);
                inner.state.complete(styled, suggestions);
            }
            Err(e) => {
                error!("Generation attempt {} failed: {}", token, e);
                inner.state.fail(e.user_message());
            }
        }
        inner.state.clone()
    }

    async fn run_requests(
        &self,
        image: &ImageUpload,
        keyword: &str,
    ) -> Result<(StyledImage, SuggestionBundle)> {
        let request = image.to_style_request(keyword);

        let editor = self.editor.clone();
        let edit_task = tokio::spawn(async move { editor.edit(&request).await });

        let suggestions = self.suggestions.clone();
        let suggestion_keyword = keyword.to_string();
        let suggestion_task =
            tokio::spawn(async move { suggestions.suggest(&suggestion_keyword).await });

        let (edited, suggested) = tokio::join!(edit_task, suggestion_task);

        // The edit error wins when both fail.
        let styled = flatten(edited)?;
        let bundle = flatten(suggested)?;
        Ok((styled, bundle))
    }
}
