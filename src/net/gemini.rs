use serde::{Deserialize, Serialize};
use url::Url;

use super::{ServiceError, TextService};

/// Request body: `{"contents":[{"parts":[{"text": ...}]}]}`
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Serialize the request body for `prompt`.
pub fn request_body(prompt: &str) -> String {
    let req = GenerateRequest {
        contents: [RequestContent {
            parts: [RequestPart { text: prompt }],
        }],
    };
    // Serializing string fields cannot fail
    serde_json::to_string(&req).unwrap_or_default()
}

/// Pull `candidates[0].content.parts[0].text` out of a response body.
pub fn extract_text(body: &str) -> Result<String, ServiceError> {
    let resp: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| ServiceError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    resp.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| ServiceError::MalformedResponse("no candidate text".to_string()))
}

/// Blocking client for `POST {api_base}/models/{model}:generateContent?key=...`.
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    api_base: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_base: &str, model: &str) -> Result<Self, ServiceError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("hive-popup/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::Transport(format!("client error: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full endpoint URL with the key as a query parameter.
    pub fn endpoint(&self, api_key: &str) -> Result<Url, ServiceError> {
        let base = format!("{}/models/{}:generateContent", self.api_base, self.model);
        Url::parse_with_params(&base, &[("key", api_key)])
            .map_err(|e| ServiceError::Transport(format!("invalid endpoint: {}", e)))
    }
}

impl TextService for GeminiClient {
    fn generate(&self, api_key: &str, prompt: &str) -> Result<String, ServiceError> {
        let url = self.endpoint(api_key)?;
        log::debug!("generateContent on {} ({} prompt chars)", self.model, prompt.len());

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(request_body(prompt))
            .send()
            .map_err(|e| ServiceError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Text service responded with {}", status);
            return Err(ServiceError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| ServiceError::Transport(format!("failed to read body: {}", e.without_url())))?;

        extract_text(&body)
    }
}
