//! # Remote Table Collaborator
//!
//! The opaque row-level interface the state manager persists through.
//!
//! ## Contract
//! One logical table of product rows, addressed by `id`. Every call either
//! fully succeeds or fails with a [`RemoteError`]; there is no partial
//! success, and the manager mutates its in-memory mirror only after a call
//! resolves Ok.
//!
//! The production implementation is [`crate::HttpProductTable`]; tests swap
//! in an in-memory table with failure injection.

use async_trait::async_trait;

use crate::error::RemoteResult;
use folio_core::{Product, ProductPatch};

/// Row-level operations against the remote product table.
///
/// ## Atomicity Expectations
/// `upsert` is the bulk write path: reorder and import hand it the complete
/// affected row set in one call, so either all positions land or none are
/// trusted. Implementations must not split it into per-row round-trips.
#[async_trait]
pub trait ProductTable: Send + Sync {
    /// Fetches every row. Implementations should request server-side
    /// ordering by `sortOrder` ascending (nulls last) then `id`, but the
    /// manager re-sorts defensively either way.
    async fn select_all(&self) -> RemoteResult<Vec<Product>>;

    /// Inserts new rows. Fails if any id already exists.
    async fn insert(&self, rows: &[Product]) -> RemoteResult<()>;

    /// Applies a partial update to the row with the given id.
    /// Updating a missing id is not an error (zero rows affected).
    async fn update(&self, id: &str, changes: &ProductPatch) -> RemoteResult<()>;

    /// Deletes the row with the given id. Deleting a missing id is not an
    /// error (idempotent).
    async fn delete(&self, id: &str) -> RemoteResult<()>;

    /// Inserts-or-replaces rows keyed by `id`, as one bulk operation.
    async fn upsert(&self, rows: &[Product]) -> RemoteResult<()>;
}
