//! Generation service interface

use thiserror::Error;

/// One image returned inline by the generation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Declared MIME type
    pub mime_type: String,
    /// Encoded image bytes
    pub data: Vec<u8>,
}

/// Failure of a single generation call
///
/// These never abort a collage on their own; the orchestrator logs them and
/// spends another attempt.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Transport failure, including timeouts
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message reported by the service
        message: String,
    },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Inline image data was not valid base64
    #[error("Invalid inline image data: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Client could not be configured
    #[error("Client configuration error: {0}")]
    Configuration(String),
}

/// External image generation service
pub trait ImageGenerationService {
    /// Generate images from a reference photo and a prompt
    ///
    /// May return zero, one or several inline images.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the response is malformed
    fn generate(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<Vec<InlineImage>, ServiceError>;
}
