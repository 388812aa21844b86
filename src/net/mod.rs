//! Remote text generation and the credential it needs.
//!
//! - `gemini`: blocking client for the hosted `generateContent` endpoint
//! - `credential`: the single locally stored API key

pub mod credential;
pub mod gemini;

use std::fmt;

pub use credential::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StorageError};
pub use gemini::GeminiClient;

/// Anything that turns a prompt into generated text.
pub trait TextService: Send + Sync {
    /// One request, no retry. Returns the extracted answer text.
    fn generate(&self, api_key: &str, prompt: &str) -> Result<String, ServiceError>;
}

impl<T: TextService + ?Sized> TextService for Box<T> {
    fn generate(&self, api_key: &str, prompt: &str) -> Result<String, ServiceError> {
        (**self).generate(api_key, prompt)
    }
}

/// Stand-in used when the HTTP client could not be built. Every call fails.
pub struct UnavailableService {
    pub reason: String,
}

impl TextService for UnavailableService {
    fn generate(&self, _api_key: &str, _prompt: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Transport(self.reason.clone()))
    }
}

/// Failure of a text-service call. `Display` gives the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// No API key stored
    NotConfigured,
    /// Network failure before a response arrived
    Transport(String),
    /// Any non-2xx response
    Status(u16),
    /// Response arrived but the answer text could not be found
    MalformedResponse(String),
}

impl ServiceError {
    /// Detail for logs; never shown to the user.
    pub fn diagnostic(&self) -> String {
        match self {
            ServiceError::NotConfigured => "no API key stored".to_string(),
            ServiceError::Transport(msg) => format!("transport: {}", msg),
            ServiceError::Status(code) => format!("HTTP status {}", code),
            ServiceError::MalformedResponse(msg) => format!("malformed response: {}", msg),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotConfigured => write!(
                f,
                "The AI features are not configured yet. Add a Gemini API key in Settings to use them."
            ),
            ServiceError::Transport(_) => write!(
                f,
                "Could not reach the text service. Check your connection and try again."
            ),
            ServiceError::Status(_) => write!(
                f,
                "The text service returned an error. Check your API key and try again."
            ),
            ServiceError::MalformedResponse(_) => write!(
                f,
                "The text service sent an unexpected reply. Please try again."
            ),
        }
    }
}
