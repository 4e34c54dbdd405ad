//! Image generation against an unreliable external service
//!
//! The service is an injected handle constructed once per process. The
//! orchestrator drives it under a bounded attempt budget and persists every
//! accepted image to an asset store.

/// HTTP client for the Gemini image generation API
pub mod gemini;
/// Bounded retry loop collecting generated images
pub mod orchestrator;
/// Generation service interface and inline image parts
pub mod service;

pub use gemini::{GeminiClient, GeminiConfig};
pub use orchestrator::{
    AttemptState, GeneratedImageAsset, GenerationOrchestrator, GenerationProgress,
    GenerationReport, SkipReason,
};
pub use service::{ImageGenerationService, InlineImage, ServiceError};
