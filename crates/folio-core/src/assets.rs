//! # Image Reference Resolution
//!
//! Maps a category + bare image filename to a displayable URL.
//!
//! ## Late-Binding Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     resolve(category, image)                            │
//! │                                                                         │
//! │  "https://cdn…/x.png"  ──────────────────────────► returned verbatim   │
//! │  "/covers/x.png"       ──────────────────────────► returned verbatim   │
//! │  "data:image/webp;…"   ──────────────────────────► returned verbatim   │
//! │                                                                         │
//! │  "n1.webp" ──► lookup "assets/notebooks/n1.webp"                        │
//! │                     │                                                   │
//! │                     ├── hit  ──► deployed URL                           │
//! │                     └── miss ──► "n1.webp" unchanged (fail-soft)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A lookup miss is never an error: a broken image reference is preferable
//! to refusing to render a card.

use std::collections::HashMap;

use crate::types::ProductCategory;

/// Precomputed mapping from logical asset paths to deployed URLs.
///
/// Built once at process start from the bundled asset manifest (the
/// build pipeline enumerates every image per category); this type itself
/// does no I/O.
#[derive(Debug, Clone, Default)]
pub struct AssetMap {
    entries: HashMap<String, String>,
}

impl AssetMap {
    /// Creates an empty map. Every resolve on it passes values through.
    pub fn new() -> Self {
        AssetMap::default()
    }

    /// Builds a map from `(logical path, deployed URL)` pairs.
    ///
    /// Logical paths are `"<category asset dir>/<filename>"`, e.g.
    /// `"assets/notebooks/n1.webp"`.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        AssetMap {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Registers one asset.
    pub fn insert(&mut self, logical_path: impl Into<String>, url: impl Into<String>) {
        self.entries.insert(logical_path.into(), url.into());
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no assets are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves an image value for display.
    ///
    /// Absolute references (URL scheme, root-relative path, inline data)
    /// pass through unchanged. Bare filenames are looked up under the
    /// category's asset directory; a miss returns the input unchanged.
    pub fn resolve(&self, category: ProductCategory, image: &str) -> String {
        if image.starts_with("http") || image.starts_with('/') || image.starts_with("data:") {
            return image.to_string();
        }

        let logical = format!("{}/{}", category.asset_dir(), image);
        match self.entries.get(&logical) {
            Some(url) => url.clone(),
            None => image.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn notebook_map() -> AssetMap {
        AssetMap::from_entries([(
            "assets/notebooks/n1.webp",
            "https://cdn.example.com/assets/n1-abc123.webp",
        )])
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let map = notebook_map();
        let resolved = map.resolve(ProductCategory::Notebook, "https://example.com/x.png");
        assert_eq!(resolved, "https://example.com/x.png");
    }

    #[test]
    fn test_root_relative_and_data_urls_pass_through() {
        let map = notebook_map();
        assert_eq!(
            map.resolve(ProductCategory::Notebook, "/covers/x.png"),
            "/covers/x.png"
        );
        assert_eq!(
            map.resolve(ProductCategory::Notebook, "data:image/webp;base64,AAAA"),
            "data:image/webp;base64,AAAA"
        );
    }

    #[test]
    fn test_known_filename_resolves_to_mapped_url() {
        let map = notebook_map();
        let resolved = map.resolve(ProductCategory::Notebook, "n1.webp");
        assert_eq!(resolved, "https://cdn.example.com/assets/n1-abc123.webp");
    }

    #[test]
    fn test_unknown_filename_passes_through() {
        let map = notebook_map();
        let resolved = map.resolve(ProductCategory::Notebook, "missing.webp");
        assert_eq!(resolved, "missing.webp");
    }

    #[test]
    fn test_lookup_is_category_scoped() {
        // n1.webp is registered for notebooks only; a book with the same
        // filename must miss and pass through.
        let map = notebook_map();
        let resolved = map.resolve(ProductCategory::IllustratedBook, "n1.webp");
        assert_eq!(resolved, "n1.webp");
    }
}
