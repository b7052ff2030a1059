//! # folio-images: Product Image Pipeline and Upload
//!
//! Turns an admin-picked image file into a public URL suitable for a
//! product record's `image` field, and removes previously uploaded images
//! when a record is deleted or its image replaced.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Upload Pipeline                                   │
//! │                                                                         │
//! │  raw bytes (any decodable format)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  decode ──► fit within category budget ──► re-encode (lossy JPEG)      │
//! │             (500×500 books, 500×750          │                          │
//! │              notebooks; NEVER upscaled)      ▼                          │
//! │                                      put to bucket under                │
//! │                                      <category>/<millis>-<slug>.jpg    │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                                      public URL ──► product.image      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Uploads propagate failures (the admin surface shows them); deletes are
//! best-effort and never fail the surrounding flow.
//!
//! ## Module Organization
//!
//! - [`pipeline`] - Decode, downscale and re-encode
//! - [`object_store`] - The `ObjectStore` collaborator trait + HTTP impl
//! - [`upload`] - The `ImageUploader` orchestrating pipeline and store
//! - [`error`] - Image pipeline error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod object_store;
pub mod pipeline;
pub mod upload;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ImageError, ImageResult};
pub use object_store::{HttpObjectStore, ObjectStore, StorageConfig};
pub use pipeline::{process_image, ProcessedImage};
pub use upload::ImageUploader;
