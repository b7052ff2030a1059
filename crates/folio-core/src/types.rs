//! # Domain Types
//!
//! Core domain types for the Folio catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Product     │   │   NewProduct    │   │  ProductPatch   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (client)    │   │  Product minus  │   │  every field    │       │
//! │  │  category       │   │  id — id is     │   │  Option<_> —    │       │
//! │  │  title, image   │   │  generated on   │   │  None = leave   │       │
//! │  │  sort_order     │   │  create         │   │  unchanged      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │ ProductCategory │   illustrated-book │ notebook                     │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The serde representation of `Product` (camelCase keys) IS the export and
//! import file format, and the row shape in the remote table. Changing a
//! field name here changes the persisted format.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

// =============================================================================
// Product Category
// =============================================================================

/// The two product lines carried by the catalog.
///
/// Immutable after creation in practice: no operation rewrites it, though
/// the type permits it (an imported record can land in either category).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    /// Illustrated books (the original product line).
    IllustratedBook,
    /// Notebooks, journals and planners.
    Notebook,
}

impl ProductCategory {
    /// The bundled asset directory holding this category's images.
    ///
    /// Used by [`crate::AssetMap`] to build the logical lookup key for a
    /// bare image filename.
    pub const fn asset_dir(&self) -> &'static str {
        match self {
            ProductCategory::IllustratedBook => "assets/illustrated-books",
            ProductCategory::Notebook => "assets/notebooks",
        }
    }

    /// The wire name of this category ("illustrated-book" / "notebook").
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::IllustratedBook => "illustrated-book",
            ProductCategory::Notebook => "notebook",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Product
// =============================================================================

/// One catalog entry (illustrated book or notebook).
///
/// ## Identity
/// `id` is globally unique and stable for the record's lifetime. New records
/// get a client-generated id (see [`generate_product_id`]) so creation never
/// needs a remote round-trip for identity.
///
/// ## Image Late-Binding
/// `image` is either a bare filename (resolved against the category's asset
/// directory at read time) or an absolute URL / data URL (returned verbatim).
/// Persisted storage stays decoupled from deployed asset locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, stable for the record's lifetime.
    pub id: String,

    /// Which product line this entry belongs to.
    pub category: ProductCategory,

    /// Display title.
    pub title: String,

    /// Display description.
    pub description: String,

    /// Badge text shown on the card (e.g. "Bestseller"); may be empty.
    pub tag: String,

    /// Bare filename (e.g. "dream-garden.webp") or a full URL / data URL.
    pub image: String,

    /// Marketplace product page link. Opaque, not validated.
    pub external_url: String,

    /// Notebook subtype (e.g. "Lined", "Bullet Journal"). Meaningful only
    /// for the notebook category; empty otherwise.
    pub notebook_type: String,

    /// Display order within a category — lower = first, `None` sorts last.
    /// Need not be contiguous; reorder re-issues a dense 0..n-1 sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

impl Product {
    /// Applies a partial update in place, keeping `id` pinned.
    ///
    /// Fields left `None` in the patch keep their current value. The patch
    /// cannot touch `id` by construction.
    pub fn apply_patch(&mut self, patch: &ProductPatch) {
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(tag) = &patch.tag {
            self.tag = tag.clone();
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
        if let Some(external_url) = &patch.external_url {
            self.external_url = external_url.clone();
        }
        if let Some(notebook_type) = &patch.notebook_type {
            self.notebook_type = notebook_type.clone();
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = Some(sort_order);
        }
    }
}

// =============================================================================
// New Product
// =============================================================================

/// Input for creating a record: a full product minus `id`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub category: ProductCategory,
    pub title: String,
    pub description: String,
    pub tag: String,
    pub image: String,
    pub external_url: String,
    pub notebook_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

impl NewProduct {
    /// Completes the record with the given id.
    pub fn into_product(self, id: String) -> Product {
        Product {
            id,
            category: self.category,
            title: self.title,
            description: self.description,
            tag: self.tag,
            image: self.image,
            external_url: self.external_url,
            notebook_type: self.notebook_type,
            sort_order: self.sort_order,
        }
    }
}

// =============================================================================
// Product Patch
// =============================================================================

/// A partial set of field changes for an update. `id` is deliberately not a
/// field: the target record is addressed separately and its id is pinned.
///
/// Serialized with `None` fields skipped, so it doubles as the PATCH body
/// sent to the remote table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

impl ProductPatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.tag.is_none()
            && self.image.is_none()
            && self.external_url.is_none()
            && self.notebook_type.is_none()
            && self.sort_order.is_none()
    }
}

// =============================================================================
// Id Generation
// =============================================================================

/// Generates a client-side record id: `custom-<unix-millis>-<suffix>`.
///
/// ## Why Client-Side?
/// Creating a record must not need a remote round-trip for identity. The
/// millisecond timestamp plus a random 5-character suffix keeps collisions
/// out of reach for a single admin session.
pub fn generate_product_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let uuid = Uuid::new_v4().simple().to_string();
    format!("custom-{}-{}", millis, &uuid[..5])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: "book-1".to_string(),
            category: ProductCategory::IllustratedBook,
            title: "Dream Garden".to_string(),
            description: "A lush garden full of flowers.".to_string(),
            tag: "Bestseller".to_string(),
            image: "dream-garden.webp".to_string(),
            external_url: "https://market.example.com/dp/B0001".to_string(),
            notebook_type: String::new(),
            sort_order: Some(0),
        }
    }

    #[test]
    fn test_category_wire_names() {
        let book = serde_json::to_string(&ProductCategory::IllustratedBook).unwrap();
        let notebook = serde_json::to_string(&ProductCategory::Notebook).unwrap();
        assert_eq!(book, "\"illustrated-book\"");
        assert_eq!(notebook, "\"notebook\"");
    }

    #[test]
    fn test_product_wire_format_uses_camel_case() {
        let json = serde_json::to_value(sample_product()).unwrap();
        assert!(json.get("externalUrl").is_some());
        assert!(json.get("notebookType").is_some());
        assert!(json.get("sortOrder").is_some());
        assert!(json.get("external_url").is_none());
    }

    #[test]
    fn test_missing_sort_order_deserializes_to_none() {
        let json = r#"{
            "id": "n-1",
            "category": "notebook",
            "title": "Pastel Notebook",
            "description": "Lined pages in soft pastel tones.",
            "tag": "",
            "image": "pastel.webp",
            "externalUrl": "https://market.example.com/dp/B0002",
            "notebookType": "Lined"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.sort_order, None);
    }

    #[test]
    fn test_apply_patch_merges_and_pins_id() {
        let mut product = sample_product();
        let patch = ProductPatch {
            title: Some("Dream Garden, 2nd Edition".to_string()),
            tag: Some(String::new()),
            ..Default::default()
        };

        product.apply_patch(&patch);

        assert_eq!(product.id, "book-1"); // untouched
        assert_eq!(product.title, "Dream Garden, 2nd Edition");
        assert_eq!(product.tag, "");
        // Unpatched fields keep their values
        assert_eq!(product.image, "dream-garden.webp");
        assert_eq!(product.sort_order, Some(0));
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = ProductPatch {
            title: Some("New Title".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert_eq!(json["title"], "New Title");
    }

    #[test]
    fn test_generated_id_shape() {
        let id = generate_product_id();
        let parts: Vec<&str> = id.splitn(3, '-').collect();
        assert_eq!(parts[0], "custom");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 5);
    }

    #[test]
    fn test_generated_ids_do_not_collide() {
        let a = generate_product_id();
        let b = generate_product_id();
        assert_ne!(a, b);
    }
}
