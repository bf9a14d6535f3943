use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// The remote generative service. Implemented over HTTP by [`GeminiClient`]
/// and by stubs in tests.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GeminiClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, model
        )
    }
}

fn summarize_parts(request: &GenerateContentRequest) -> Vec<String> {
    request
        .contents
        .iter()
        .flat_map(|content| content.parts.iter())
        .map(|part| match (&part.text, &part.inline_data) {
            (Some(text), _) => format!("text({} chars)", text.len()),
            (None, Some(inline)) => format!("inline({}, {} bytes b64)", inline.mime_type, inline.data.len()),
            (None, None) => "empty".to_string(),
        })
        .collect()
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        debug!(
            "Calling generateContent on {} with parts {:?}",
            model,
            summarize_parts(&request)
        );

        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|parsed| parsed.error.message)
                .unwrap_or(body);
            warn!("generateContent on {} failed with {}: {}", model, status, message);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response.json::<GenerateContentResponse>().await?;

        debug!(
            "Received generateContent response with {} candidates",
            parsed.candidates.as_ref().map_or(0, |c| c.len())
        );

        Ok(parsed)
    }
}
