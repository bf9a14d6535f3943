use photo_stylist::{
    config::LlmConfig,
    llm::{Candidate, Content, GenerateContentResponse, Part},
    stylist::{ImageUpload, Stylist},
};
use serde_json::json;
use std::sync::Arc;

use super::mocks::StubLlmClient;

pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const TEXT_MODEL: &str = "gemini-2.5-flash";

pub const SUGGESTIONS_JSON: &str = r#"{"caption":"Golden hour glow","hashtags":["vintage","filmlook","retro"],"relatedPrompts":["sepia","polaroid","grain","faded","warmtone"]}"#;

/// Base64 of the bytes `styled`.
pub const STYLED_B64: &str = "c3R5bGVk";

pub fn create_test_config() -> LlmConfig {
    LlmConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        api_key: "test-api-key".to_string(),
        image_model: IMAGE_MODEL.to_string(),
        text_model: TEXT_MODEL.to_string(),
    }
}

pub fn response_with_parts(parts: Vec<Part>) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: Some(vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts,
            }),
            finish_reason: Some("STOP".to_string()),
        }]),
    }
}

pub fn image_response(mime_type: &str, data: &str) -> GenerateContentResponse {
    response_with_parts(vec![Part::inline_data(mime_type, data)])
}

pub fn text_response(text: &str) -> GenerateContentResponse {
    response_with_parts(vec![Part::text(text)])
}

/// A stub that answers both capabilities successfully.
pub fn happy_stub() -> StubLlmClient {
    StubLlmClient::new()
        .with_response(IMAGE_MODEL, image_response("image/png", STYLED_B64))
        .with_response(TEXT_MODEL, text_response(SUGGESTIONS_JSON))
}

pub fn create_stylist(stub: Arc<StubLlmClient>) -> Stylist {
    Stylist::new(stub, &create_test_config())
}

pub fn test_upload() -> ImageUpload {
    ImageUpload::new(b"original-photo".to_vec(), "image/jpeg")
        .unwrap()
        .with_file_name("me.jpg")
}

pub fn gemini_image_body(mime_type: &str, data: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "inlineData": { "mimeType": mime_type, "data": data } }]
            },
            "finishReason": "STOP"
        }]
    })
}

pub fn gemini_text_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}
