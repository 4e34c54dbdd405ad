//! Input/output operations and error handling
//!
//! This module contains:
//! - Command-line parsing and the collage command
//! - Configuration constants
//! - Error types
//! - Image decoding and encoding
//! - Request and result payloads
//! - Progress display
//! - Asset storage

/// Command-line interface and the collage command
pub mod cli;
/// Default parameters and fixed constants
pub mod configuration;
/// Error types for the whole crate
pub mod error;
/// Image decoding, encoding and export
pub mod image;
/// Request and result payloads
pub mod payload;
/// Terminal progress over generation attempts
pub mod progress;
/// Bounded-size asset directories
pub mod store;
