//! # Image Pipeline Error Types

use thiserror::Error;

/// Failures from the image pipeline and the object store.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The picked file could not be decoded, or re-encoding failed.
    #[error("image processing failed: {0}")]
    Processing(#[from] image::ImageError),

    /// Transport-level failure talking to the storage endpoint.
    #[error("object storage unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The storage endpoint answered and refused.
    #[error("object storage rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Client construction failed (malformed credentials).
    #[error("invalid storage configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for image pipeline operations.
pub type ImageResult<T> = Result<T, ImageError>;
