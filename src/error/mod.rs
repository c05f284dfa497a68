//! # Error Module
//!
//! Error types for the perceptual hashing pipeline.
//!
//! ## Design Principles
//! - **Never panic** on caller data - every condition reachable from untrusted
//!   pixels or hash strings comes back as an error value
//! - **One enum per stage** - preprocessing, transform and hash parsing each own
//!   their failure modes, and `PhashError` unifies them
//! - **Include context** - dimensions, offending input, what went wrong

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error
#[derive(Error, Debug)]
pub enum PhashError {
    #[error("Preprocessing error: {0}")]
    Preprocess(#[from] PreprocessError),

    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("Hash parse error: {0}")]
    Parse(#[from] HashParseError),

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Failed to open image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning a pixel source into a grayscale buffer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreprocessError {
    #[error("Invalid input: source image is {width}x{height}, both sides must be non-zero")]
    InvalidInput { width: u32, height: u32 },

    #[error("Invalid pixel layout: {width}x{height} {layout} needs {expected} bytes, got {actual}")]
    InvalidLayout {
        layout: &'static str,
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Resize failed: {0}")]
    ResizeFailed(String),
}

/// Errors raised by the DCT stage
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Dimension mismatch: expected {expected}x{expected} buffer, got {width}x{height}")]
    DimensionMismatch {
        expected: u32,
        width: u32,
        height: u32,
    },
}

/// Errors raised when a hash string cannot be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashParseError {
    #[error("Malformed hash {input:?}: {reason}")]
    MalformedHash { input: String, reason: String },
}

impl HashParseError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        HashParseError::MalformedHash {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, PhashError>;
