//! Gemini `generateContent` client
//!
//! Sends the reference photo as an inline base64 part followed by the prompt and
//! collects every inline image from the first candidate of the response.

use crate::generation::service::{ImageGenerationService, InlineImage, ServiceError};
use crate::io::configuration::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Connection settings for [`GeminiClient`]
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent in the `x-goog-api-key` header
    pub api_key: String,
    /// Model name, with or without the `models/` prefix
    pub model: String,
    /// API base URL
    pub endpoint: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Default model, endpoint and timeout for an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Use another model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use another API base URL
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// URL of the `generateContent` method for the configured model
    pub fn generate_url(&self) -> String {
        let model = self.model.trim();
        let model_path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        };
        format!(
            "{}/{model_path}:generateContent",
            self.endpoint.trim().trim_end_matches('/')
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: RequestBlob<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBlob<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default, rename = "inlineData", alias = "inline_data")]
    inline_data: Option<ResponseBlob>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseBlob {
    #[serde(default, rename = "mimeType", alias = "mime_type")]
    mime_type: String,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Blocking Gemini client, constructed once and shared across requests
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from its configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the HTTP client cannot be built
    pub fn new(config: &GeminiConfig) -> Result<Self, ServiceError> {
        if config.api_key.trim().is_empty() {
            return Err(ServiceError::Configuration("API key is empty".to_string()));
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            url: config.generate_url(),
            api_key: config.api_key.clone(),
        })
    }
}

/// Inline images of the first candidate of a raw response body
///
/// # Errors
///
/// Returns an error if the body is not a response document or carries invalid
/// base64 data
pub fn parse_inline_images(body: &str) -> Result<Vec<InlineImage>, ServiceError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let Some(parts) = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
    else {
        return Ok(Vec::new());
    };

    parts
        .into_iter()
        .filter_map(|part| part.inline_data)
        .filter(|blob| !blob.data.is_empty())
        .map(|blob| {
            Ok(InlineImage {
                mime_type: blob.mime_type,
                data: BASE64.decode(blob.data.as_bytes())?,
            })
        })
        .collect()
}

impl ImageGenerationService for GeminiClient {
    fn generate(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<Vec<InlineImage>, ServiceError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::Inline {
                        inline_data: RequestBlob {
                            mime_type,
                            data: BASE64.encode(image),
                        },
                    },
                    RequestPart::Text { text: prompt },
                ],
            }],
        };

        let response = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let images = parse_inline_images(&body)?;
        debug!(images = images.len(), "generation response");
        Ok(images)
    }
}
