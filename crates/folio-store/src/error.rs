//! # Store Error Types
//!
//! Error types for the state manager and the remote table client.
//!
//! ## Propagation Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Failure Taxonomy                                     │
//! │                                                                         │
//! │  remote-unavailable (initial load fails)                               │
//! │       └─► ABSORBED: snapshot fallback + degraded flag, warn-logged     │
//! │                                                                         │
//! │  write-rejected (CRUD / reorder / import remote call fails)            │
//! │       └─► PROPAGATED: StoreError::Remote, verbatim message,            │
//! │           no local mutation, no retry                                   │
//! │                                                                         │
//! │  malformed-input (import payload is not an array of records)           │
//! │       └─► PROPAGATED: StoreError::InvalidImport, raised BEFORE         │
//! │           any remote call                                               │
//! │                                                                         │
//! │  asset-unresolvable (image lookup miss)                                │
//! │       └─► ABSORBED: resolver passes the value through (folio-core)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Remote Table Error
// =============================================================================

/// Failures from the remote table collaborator.
///
/// The manager does not distinguish transient from permanent failures;
/// callers own any retry affordance.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("remote table unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote store answered and refused. The body is surfaced
    /// verbatim so the admin surface can display it.
    #[error("remote table rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// A 2xx response whose body could not be decoded as product rows.
    #[error("unreadable remote response: {0}")]
    InvalidResponse(String),
}

// =============================================================================
// Store Error
// =============================================================================

/// Errors surfaced by [`crate::CatalogStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A remote-backed write was rejected. Local state is untouched.
    #[error("remote store error: {0}")]
    Remote(#[from] RemoteError),

    /// An import payload did not parse as a sequence of product records.
    /// Raised before any remote call; local state is untouched.
    #[error("invalid import payload: {0}")]
    InvalidImport(String),

    /// File-level export/import failed.
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for remote table operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_is_surfaced_verbatim() {
        let err = RemoteError::Rejected {
            status: 403,
            message: "new row violates row-level security policy".to_string(),
        };
        let store_err = StoreError::from(err);
        assert!(store_err
            .to_string()
            .contains("new row violates row-level security policy"));
    }

    #[test]
    fn test_invalid_import_message() {
        let err = StoreError::InvalidImport("payload must be an array".to_string());
        assert_eq!(
            err.to_string(),
            "invalid import payload: payload must be an array"
        );
    }
}
