//! # folio-store: Product State Manager
//!
//! This crate provides the catalog's single source of truth: one in-memory
//! product collection mirroring a remote relational table, with CRUD,
//! reorder, export/import and reload, and graceful degradation to the
//! bundled snapshot when the remote table is unreachable.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Folio Data Flow                                  │
//! │                                                                         │
//! │  Admin action (create / edit / drag-reorder / import)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   folio-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ CatalogStore  │    │ ProductTable  │    │    assets    │  │   │
//! │  │   │  (store.rs)   │───►│  (remote.rs)  │    │  dir scanner │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ Vec<Product>  │    │ HttpProduct-  │    │ builds the   │  │   │
//! │  │   │ degraded flag │    │ Table(http.rs)│    │ AssetMap     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Remote table (PostgREST-style HTTP endpoint)                          │
//! │       │ unreachable?                                                    │
//! │       ▼                                                                 │
//! │  Bundled snapshot (folio-core) — visitors never see an empty catalog   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Discipline
//! Every remote-backed write lands in the remote table BEFORE the in-memory
//! mirror is touched. A failed remote call leaves local state exactly as it
//! was; the error carries the backing store's message and is never retried
//! here.
//!
//! ## Module Organization
//!
//! - [`store`] - The `CatalogStore` state manager
//! - [`remote`] - The `ProductTable` collaborator trait
//! - [`http`] - HTTP implementation of `ProductTable`
//! - [`assets`] - Asset directory scanner feeding the `AssetMap`
//! - [`error`] - Store and remote-table error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod assets;
pub mod error;
pub mod http;
pub mod remote;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{RemoteError, StoreError};
pub use http::{HttpProductTable, RemoteConfig};
pub use remote::ProductTable;
pub use store::CatalogStore;
