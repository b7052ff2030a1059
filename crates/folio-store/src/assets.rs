//! # Asset Directory Scanner
//!
//! Builds the [`AssetMap`] by enumerating the bundled image files per
//! category, once at process start.
//!
//! The original deployment resolved these mappings at build time (hashed
//! asset URLs emitted by the bundler); here the scan runs at startup over
//! the deployed asset tree and maps each logical path to its public URL.
//! The resolver itself stays pure in folio-core — this module is the only
//! place asset discovery touches the file system.

use std::io;
use std::path::Path;

use tracing::debug;

use folio_core::{AssetMap, ProductCategory};

/// File extensions considered product images.
const IMAGE_EXTENSIONS: [&str; 4] = ["webp", "png", "jpg", "jpeg"];

/// Scans the per-category asset directories under `bundle_root` and maps
/// every image to `<public_base>/<logical path>`.
///
/// A missing category directory is skipped, not an error: a deployment may
/// carry only one product line's assets.
///
/// ## Example
/// ```rust,ignore
/// // bundle_root/assets/notebooks/n1.webp
/// //   → ("assets/notebooks/n1.webp", "https://cdn.example.com/assets/notebooks/n1.webp")
/// let map = scan_asset_dirs(Path::new("dist"), "https://cdn.example.com")?;
/// ```
pub fn scan_asset_dirs(bundle_root: &Path, public_base: &str) -> io::Result<AssetMap> {
    let mut map = AssetMap::new();
    let base = public_base.trim_end_matches('/');

    for category in [ProductCategory::IllustratedBook, ProductCategory::Notebook] {
        let dir = bundle_root.join(category.asset_dir());
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "asset directory missing, skipping");
            continue;
        }

        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let is_image = Path::new(name)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if !is_image {
                continue;
            }

            let logical = format!("{}/{}", category.asset_dir(), name);
            let url = format!("{}/{}", base, logical);
            map.insert(logical, url);
        }
    }

    debug!(count = map.len(), "asset map built");
    Ok(map)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_maps_images_and_skips_other_files() {
        let root = tempfile::tempdir().unwrap();
        let notebooks = root.path().join("assets/notebooks");
        fs::create_dir_all(&notebooks).unwrap();
        fs::write(notebooks.join("n1.webp"), b"img").unwrap();
        fs::write(notebooks.join("readme.txt"), b"not an image").unwrap();

        let map = scan_asset_dirs(root.path(), "https://cdn.example.com/").unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(
            map.resolve(ProductCategory::Notebook, "n1.webp"),
            "https://cdn.example.com/assets/notebooks/n1.webp"
        );
    }

    #[test]
    fn test_scan_tolerates_missing_category_dir() {
        let root = tempfile::tempdir().unwrap();
        let books = root.path().join("assets/illustrated-books");
        fs::create_dir_all(&books).unwrap();
        fs::write(books.join("b1.png"), b"img").unwrap();
        // no assets/notebooks at all

        let map = scan_asset_dirs(root.path(), "https://cdn.example.com").unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(
            map.resolve(ProductCategory::IllustratedBook, "b1.png"),
            "https://cdn.example.com/assets/illustrated-books/b1.png"
        );
    }
}
