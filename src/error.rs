use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub const VALIDATION_MISSING_INPUT: &str = "Please upload an image and provide a prompt.";
pub const GENERATION_FAILED: &str =
    "Image generation failed or API returned an unexpected response.";
pub const SUGGESTIONS_FAILED: &str =
    "Could not get suggestions from the API. The response was not valid JSON.";
pub const UNKNOWN_ERROR: &str = "An unknown error occurred. Please try again.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Suggestion error: {0}")]
    Suggestion(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Clone for Error {
    fn clone(&self) -> Self {
        match self {
            Self::Config(s) => Self::Config(s.clone()),
            Self::Validation(s) => Self::Validation(s.clone()),
            Self::Generation(s) => Self::Generation(s.clone()),
            Self::Suggestion(s) => Self::Suggestion(s.clone()),
            Self::Api { status, message } => Self::Api {
                status: *status,
                message: message.clone(),
            },
            Self::SessionNotFound { session_id } => Self::SessionNotFound {
                session_id: session_id.clone(),
            },
            Self::Internal(s) => Self::Internal(s.clone()),
            Self::Base64(e) => Self::Base64(e.clone()),
            // For errors that can't be cloned, convert to string representation
            Self::Serialization(e) => Self::Internal(format!("Serialization error: {}", e)),
            Self::Yaml(e) => Self::Internal(format!("YAML error: {}", e)),
            Self::Io(e) => Self::Internal(format!("IO error: {}", e)),
            Self::Network(e) => Self::Internal(format!("Network error: {}", e)),
            Self::AddrParse(e) => Self::Internal(format!("Address parse error: {}", e)),
        }
    }
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    pub fn suggestion(msg: impl Into<String>) -> Self {
        Self::Suggestion(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The single message shown in the error banner for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Generation(msg) | Self::Suggestion(msg) => msg.clone(),
            Self::Internal(_) => UNKNOWN_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}
