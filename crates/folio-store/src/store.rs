//! # Catalog Store
//!
//! The product state manager: one in-memory collection, initialized once,
//! serving every read for the session and forwarding writes to the remote
//! table before committing them locally.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CatalogStore Lifecycle                               │
//! │                                                                         │
//! │  init(remote, snapshot)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  remote configured? ── no ──► install snapshot (local-only variant)    │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  select_all ── Ok ──► sort (sortOrder asc nulls-last, id asc), install │
//! │       │                                                                 │
//! │       └─ Err ──► warn-log, install snapshot, set degraded flag         │
//! │                  (visitors still see a full catalog; only the admin     │
//! │                   surface shows the degraded banner)                    │
//! │                                                                         │
//! │  …session: reads from memory, writes remote-first…                     │
//! │                                                                         │
//! │  reload() ──► re-run the load path, dropping unpersisted local state   │
//! │  reset_to_defaults() ──► fresh snapshot copy, no remote interaction    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The store is a plain value owned by the application's composition root
//! and passed by reference to whatever surface needs it — "exactly one
//! store per process" without a hidden module-level singleton. All writes
//! go through `&mut self`, so readers can never observe a half-applied
//! mutation.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::remote::ProductTable;
use folio_core::{generate_product_id, AssetMap, NewProduct, Product, ProductCategory, ProductPatch};

/// The in-memory product state manager.
///
/// After [`CatalogStore::init`], the in-memory collection is the single
/// source of truth for rendering; the remote table is a persistence target,
/// never a read path, until [`CatalogStore::reload`].
pub struct CatalogStore {
    /// Remote table collaborator. `None` = local-only configuration:
    /// writes mutate memory directly and the snapshot is the baseline.
    remote: Option<Arc<dyn ProductTable>>,

    /// Factory defaults / fallback records, in bundled order.
    snapshot: Vec<Product>,

    /// The authoritative collection for this session.
    records: Vec<Product>,

    /// Message of the load failure, if the last (re)load fell back to the
    /// snapshot. Non-fatal; only the admin surface renders it.
    degraded: Option<String>,
}

impl CatalogStore {
    // =========================================================================
    // Initialization / Load
    // =========================================================================

    /// Creates the store and performs the initial load.
    ///
    /// With a remote table configured the collection comes from
    /// `select_all`, sorted deterministically; on any failure the bundled
    /// snapshot takes its place and the degraded flag is set. Without a
    /// remote table the snapshot is installed directly.
    pub async fn init(remote: Option<Arc<dyn ProductTable>>, snapshot: Vec<Product>) -> Self {
        let mut store = CatalogStore {
            remote,
            snapshot,
            records: Vec::new(),
            degraded: None,
        };
        store.load().await;
        store
    }

    /// Re-runs the load path, discarding all unpersisted local state.
    pub async fn reload(&mut self) {
        self.load().await;
    }

    async fn load(&mut self) {
        let Some(remote) = self.remote.clone() else {
            debug!("no remote table configured, installing snapshot");
            self.records = self.snapshot.clone();
            self.degraded = None;
            return;
        };

        match remote.select_all().await {
            Ok(mut rows) => {
                // Deterministic order even when sortOrder is sparse.
                sort_for_display(&mut rows);
                info!(count = rows.len(), "catalog loaded from remote table");
                self.records = rows;
                self.degraded = None;
            }
            Err(err) => {
                // Resilience contract: the catalog must never render empty
                // because of a backend outage. Visitors get the snapshot;
                // the admin surface gets the degraded flag.
                warn!(error = %err, "remote table unavailable, serving bundled snapshot");
                self.records = self.snapshot.clone();
                self.degraded = Some(err.to_string());
            }
        }
    }

    /// Replaces the collection with a fresh copy of the bundled snapshot,
    /// discarding all in-session edits. No remote interaction.
    pub fn reset_to_defaults(&mut self) {
        info!("resetting catalog to bundled defaults");
        self.records = self.snapshot.clone();
        self.degraded = None;
    }

    // =========================================================================
    // Read Views
    // =========================================================================

    /// The raw collection: unresolved image references, session order.
    /// This is what export serializes and the admin table edits.
    pub fn all(&self) -> &[Product] {
        &self.records
    }

    /// Load-failure message from the last (re)load, if any.
    pub fn degraded(&self) -> Option<&str> {
        self.degraded.as_deref()
    }

    /// True when the collection currently comes from the snapshot fallback.
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }

    /// Display view for one category: exact-match filter, image references
    /// rewritten through the asset map. Recomputed per call so it always
    /// reflects the latest committed state.
    pub fn category_view(&self, category: ProductCategory, assets: &AssetMap) -> Vec<Product> {
        self.records
            .iter()
            .filter(|p| p.category == category)
            .map(|p| {
                let mut resolved = p.clone();
                resolved.image = assets.resolve(p.category, &p.image);
                resolved
            })
            .collect()
    }

    /// Display view of the illustrated-book line.
    pub fn illustrated_books(&self, assets: &AssetMap) -> Vec<Product> {
        self.category_view(ProductCategory::IllustratedBook, assets)
    }

    /// Display view of the notebook line.
    pub fn notebooks(&self, assets: &AssetMap) -> Vec<Product> {
        self.category_view(ProductCategory::Notebook, assets)
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Creates a record from the input, generating its id client-side.
    ///
    /// Remote insert first; the record is appended locally only after the
    /// insert succeeds. Appended, not re-sorted: a new record trails its
    /// category until a reorder repositions it.
    pub async fn create(&mut self, input: NewProduct) -> StoreResult<Product> {
        let product = input.into_product(generate_product_id());
        debug!(id = %product.id, title = %product.title, "creating product");

        if let Some(remote) = &self.remote {
            remote.insert(std::slice::from_ref(&product)).await?;
        }

        self.records.push(product.clone());
        Ok(product)
    }

    /// Applies a partial update to the record with the given id.
    ///
    /// Remote update first. On success the local record is replaced by the
    /// merge of its current fields and the patch, id pinned. A record that
    /// vanished locally in the meantime (concurrent delete) is a no-op.
    pub async fn update(&mut self, id: &str, patch: ProductPatch) -> StoreResult<()> {
        debug!(id = %id, "updating product");

        if let Some(remote) = &self.remote {
            remote.update(id, &patch).await?;
        }

        if let Some(record) = self.records.iter_mut().find(|p| p.id == id) {
            record.apply_patch(&patch);
        }
        Ok(())
    }

    /// Deletes the record with the given id. Idempotent: an id with no
    /// matching record succeeds and changes nothing.
    pub async fn delete(&mut self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "deleting product");

        if let Some(remote) = &self.remote {
            remote.delete(id).await?;
        }

        self.records.retain(|p| p.id != id);
        Ok(())
    }

    // =========================================================================
    // Reorder
    // =========================================================================

    /// Persists a new display order for the given ids.
    ///
    /// Each input id gets `sortOrder` = its position index — a dense
    /// 0..n-1 sequence — and all affected rows go out as ONE bulk upsert
    /// keyed by id, because a reorder touches every item in the affected
    /// range and must land whole.
    ///
    /// ## Subset Reorders
    /// The input may be one category's ids (drag-reorder within a tab).
    /// Records outside the input keep their prior relative positions in
    /// memory and are untouched remotely; input records are placed, in
    /// input order, into the slots the input set occupied. Ids with no
    /// current record are dropped (concurrent deletion).
    pub async fn reorder(&mut self, ordered_ids: &[String]) -> StoreResult<()> {
        let by_id: HashMap<&str, &Product> =
            self.records.iter().map(|p| (p.id.as_str(), p)).collect();

        let mut updates: Vec<Product> = Vec::with_capacity(ordered_ids.len());
        for (position, id) in ordered_ids.iter().enumerate() {
            let Some(current) = by_id.get(id.as_str()) else {
                warn!(id = %id, "reorder id has no current record, dropping");
                continue;
            };
            // Full rows, not just (id, sortOrder) pairs: the upsert must
            // satisfy the table's not-null columns.
            let mut row = (*current).clone();
            row.sort_order = Some(position as i64);
            updates.push(row);
        }

        debug!(count = updates.len(), "persisting reorder");
        if let Some(remote) = &self.remote {
            remote.upsert(&updates).await?;
        }

        let moved: HashSet<&str> = updates.iter().map(|p| p.id.as_str()).collect();
        let mut replacements = updates.iter();
        self.records = self
            .records
            .iter()
            .map(|p| {
                if moved.contains(p.id.as_str()) {
                    replacements
                        .next()
                        .expect("one replacement per moved record")
                        .clone()
                } else {
                    p.clone()
                }
            })
            .collect();
        Ok(())
    }

    // =========================================================================
    // Export / Import
    // =========================================================================

    /// Serializes the raw collection, pretty-printed, images unresolved.
    ///
    /// This is the documented path for turning transient admin edits into a
    /// durable checked-in baseline (or a backup/migration artifact).
    pub fn export_json(&self) -> String {
        // Product has no map keys or non-string-keyed content; this cannot fail.
        serde_json::to_string_pretty(&self.records).expect("product records always serialize")
    }

    /// Writes [`CatalogStore::export_json`] to a file.
    pub async fn export_to_file(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let json = self.export_json();
        tokio::fs::write(path.as_ref(), json).await?;
        info!(path = %path.as_ref().display(), count = self.records.len(), "catalog exported");
        Ok(())
    }

    /// Imports a full catalog from a JSON payload.
    ///
    /// The payload must be an array of product records; anything else fails
    /// with [`StoreError::InvalidImport`] before any remote call. On
    /// success the whole sequence is upserted keyed by id (overwriting
    /// existing ids is allowed) and then REPLACES the in-memory collection
    /// — import is a full replace, not a merge. Without a remote table the
    /// replacement happens directly.
    pub async fn import_json(&mut self, payload: &str) -> StoreResult<()> {
        let value: serde_json::Value = serde_json::from_str(payload)
            .map_err(|e| StoreError::InvalidImport(e.to_string()))?;
        if !value.is_array() {
            return Err(StoreError::InvalidImport(
                "payload must be an array of product records".to_string(),
            ));
        }
        let records: Vec<Product> = serde_json::from_value(value)
            .map_err(|e| StoreError::InvalidImport(e.to_string()))?;

        if let Some(remote) = &self.remote {
            remote.upsert(&records).await?;
        }

        info!(count = records.len(), "catalog imported");
        self.records = records;
        Ok(())
    }

    /// Reads a file and imports its contents via [`CatalogStore::import_json`].
    pub async fn import_from_file(&mut self, path: impl AsRef<Path>) -> StoreResult<()> {
        let payload = tokio::fs::read_to_string(path.as_ref()).await?;
        self.import_json(&payload).await
    }
}

/// Sorts rows by `sortOrder` ascending with `None` last, then by `id` as a
/// stable tie-break.
fn sort_for_display(rows: &mut [Product]) {
    rows.sort_by(|a, b| match (a.sort_order, b.sort_order) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
}

// =============================================================================
// Unit Tests
// =============================================================================
