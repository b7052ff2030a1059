//! # Static Snapshot
//!
//! The bundled product records compiled into the binary.
//!
//! ## Two Roles
//! 1. **Fallback data source**: when the initial remote load fails, the
//!    catalog renders these records instead of an empty page.
//! 2. **Factory defaults**: a local-only store starts from (and can reset
//!    back to) exactly this sequence.
//!
//! The JSON lives in `data/products.json` and uses the same record format
//! as export/import, so a fresh export from a configured store is a valid
//! replacement baseline for this file.

use std::sync::OnceLock;

use crate::types::Product;

/// The embedded snapshot payload, exactly as checked in.
pub const SNAPSHOT_JSON: &str = include_str!("../data/products.json");

static SNAPSHOT: OnceLock<Vec<Product>> = OnceLock::new();

/// Returns the bundled product records in their stored order.
///
/// Parsed once per process on first access. A malformed bundled file is a
/// build defect, not a runtime condition, so this panics rather than
/// returning a Result.
pub fn bundled_products() -> &'static [Product] {
    SNAPSHOT
        .get_or_init(|| {
            serde_json::from_str(SNAPSHOT_JSON).expect("bundled products.json must be valid")
        })
        .as_slice()
}

// =============================================================================
// Unit Tests
// =============================================================================
