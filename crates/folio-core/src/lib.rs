//! # folio-core: Pure Domain Logic for the Folio Catalog
//!
//! This crate is the **heart** of the Folio catalog. It contains the product
//! record model and every pure computation the catalog needs, with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Folio Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Admin UI / Catalog Pages (TS)                  │   │
//! │  │    Product Grid ──► Admin Table ──► Export/Import Buttons      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    folio-store (state manager)                  │   │
//! │  │    CatalogStore: load, CRUD, reorder, export, import, reload   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐      ┌───────────┐      ┌───────────┐          │   │
//! │  │   │   types   │      │  assets   │      │ snapshot  │          │   │
//! │  │   │  Product  │      │ AssetMap  │      │  bundled  │          │   │
//! │  │   │  Category │      │  resolve  │      │  records  │          │   │
//! │  │   └───────────┘      └───────────┘      └───────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductCategory, NewProduct, ProductPatch)
//! - [`assets`] - Image reference resolution (bare filename → deployed URL)
//! - [`snapshot`] - The bundled static snapshot used as fallback / factory defaults
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic given its inputs
//!    (id generation reads the clock, nothing else)
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Fail-Soft Rendering**: A broken image reference is returned verbatim,
//!    never turned into an error during render

// =============================================================================
// Module Declarations
// =============================================================================

pub mod assets;
pub mod snapshot;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use folio_core::Product` instead of
// `use folio_core::types::Product`

pub use assets::AssetMap;
pub use snapshot::bundled_products;
pub use types::{generate_product_id, NewProduct, Product, ProductCategory, ProductPatch};
