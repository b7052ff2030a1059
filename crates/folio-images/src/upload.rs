//! # Image Uploader
//!
//! Orchestrates the pipeline and the object store: process, key, put,
//! return the public URL. Also the best-effort delete path keyed off a
//! previously returned public URL.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::ImageResult;
use crate::object_store::ObjectStore;
use crate::pipeline::process_image;
use folio_core::ProductCategory;

/// Uploads processed product images and removes superseded ones.
pub struct ImageUploader {
    store: Arc<dyn ObjectStore>,
    /// Bucket name, used to recognize our own public URLs on delete.
    bucket: String,
}

impl ImageUploader {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        ImageUploader {
            store,
            bucket: bucket.into(),
        }
    }

    /// Processes `input` for the category and uploads it, returning the
    /// public URL to write into the product record.
    ///
    /// The object key is `<category>/<unix-millis>-<slug>.jpg`, so repeated
    /// uploads of the same file never collide and the bucket stays
    /// browsable by product line.
    pub async fn upload(
        &self,
        category: ProductCategory,
        file_name: &str,
        input: &[u8],
    ) -> ImageResult<String> {
        let processed = process_image(input, category)?;
        let key = format!(
            "{}/{}-{}.jpg",
            category.as_str(),
            Utc::now().timestamp_millis(),
            slug(file_name)
        );

        self.store.put(&key, processed.bytes, "image/jpeg").await?;
        let url = self.store.public_url(&key);
        info!(key = %key, width = processed.width, height = processed.height, "image uploaded");
        Ok(url)
    }

    /// Best-effort removal of a previously uploaded image by its public URL.
    ///
    /// URLs that do not point into our bucket (bundled assets, external
    /// hotlinks, data URIs) are silently skipped. Removal failures are
    /// logged and swallowed: a stale object must never block deleting or
    /// editing the product record itself.
    pub async fn delete_by_url(&self, url: &str) {
        let marker = format!("/{}/", self.bucket);
        let Some(idx) = url.find(&marker) else {
            debug!(url = %url, "not a managed image URL, skipping delete");
            return;
        };
        let key = &url[idx + marker.len()..];
        let key = key.split('?').next().unwrap_or(key);
        if key.is_empty() {
            debug!(url = %url, "managed URL carries no object key, skipping delete");
            return;
        }

        if let Err(err) = self.store.remove(key).await {
            warn!(key = %key, error = %err, "failed to remove superseded image");
        }
    }
}

/// File name to key slug: extension stripped, non-alphanumerics collapsed
/// to dashes, lowercased, capped at 60 characters.
fn slug(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => stem,
        _ => file_name,
    };
    let mut slug: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    slug.truncate(60);
    slug
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImageError;
    use async_trait::async_trait;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockStore {
        puts: Mutex<Vec<(String, Vec<u8>, String)>>,
        removed: Mutex<Vec<String>>,
        fail_remove: Mutex<bool>,
    }

    #[async_trait]
    impl ObjectStore for MockStore {
        async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> ImageResult<()> {
            self.puts
                .lock()
                .unwrap()
                .push((key.to_string(), bytes, content_type.to_string()));
            Ok(())
        }

        async fn remove(&self, key: &str) -> ImageResult<()> {
            if *self.fail_remove.lock().unwrap() {
                return Err(ImageError::Rejected {
                    status: 503,
                    message: "storage unavailable".to_string(),
                });
            }
            self.removed.lock().unwrap().push(key.to_string());
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            format!(
                "https://abc.supabase.co/storage/v1/object/public/product-images/{}",
                key
            )
        }
    }

    fn uploader() -> (Arc<MockStore>, ImageUploader) {
        let store = Arc::new(MockStore::default());
        let uploader = ImageUploader::new(store.clone(), "product-images");
        (store, uploader)
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[tokio::test]
    async fn test_upload_puts_processed_jpeg_and_returns_public_url() {
        let (store, uploader) = uploader();

        let url = uploader
            .upload(
                ProductCategory::IllustratedBook,
                "Cover Art.PNG",
                &png_bytes(1000, 400),
            )
            .await
            .unwrap();

        let puts = store.puts.lock().unwrap();
        assert_eq!(puts.len(), 1);
        let (key, bytes, content_type) = &puts[0];
        assert!(key.starts_with("illustrated-book/"));
        assert!(key.ends_with("-cover-art.jpg"));
        assert_eq!(content_type, "image/jpeg");
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(url, store.public_url(key));

        // Key shape: <category>/<unix-millis>-<slug>.jpg
        let (_, rest) = key.split_once('/').unwrap();
        let (millis, _) = rest.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
    }

    #[tokio::test]
    async fn test_upload_fails_on_undecodable_input() {
        let (store, uploader) = uploader();

        let result = uploader
            .upload(ProductCategory::Notebook, "broken.png", b"not an image")
            .await;

        assert!(matches!(result, Err(ImageError::Processing(_))));
        assert!(store.puts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_extracts_key_and_strips_query() {
        let (store, uploader) = uploader();

        uploader
            .delete_by_url(
                "https://abc.supabase.co/storage/v1/object/public/product-images/notebook/171-cover.jpg?width=500",
            )
            .await;

        assert_eq!(
            store.removed.lock().unwrap().as_slice(),
            ["notebook/171-cover.jpg"]
        );
    }

    #[tokio::test]
    async fn test_delete_skips_foreign_urls() {
        let (store, uploader) = uploader();

        uploader.delete_by_url("https://cdn.example.com/assets/notebooks/n1.webp").await;
        uploader.delete_by_url("n1.webp").await;
        uploader.delete_by_url("data:image/png;base64,AAAA").await;

        assert!(store.removed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_is_swallowed() {
        let (store, uploader) = uploader();
        *store.fail_remove.lock().unwrap() = true;

        // Must not panic or propagate.
        uploader
            .delete_by_url(
                "https://abc.supabase.co/storage/v1/object/public/product-images/notebook/171-cover.jpg",
            )
            .await;

        assert!(store.removed.lock().unwrap().is_empty());
    }

    #[test]
    fn test_slug_strips_extension_and_normalizes() {
        assert_eq!(slug("Cover Art.PNG"), "cover-art");
        assert_eq!(slug("My Photo (1).jpeg"), "my-photo--1-");
        assert_eq!(slug("archive.tar.gz"), "archive-tar");
        assert_eq!(slug("noextension"), "noextension");
    }

    #[test]
    fn test_slug_caps_length() {
        let long = "a".repeat(100) + ".png";
        assert_eq!(slug(&long).len(), 60);
    }
}
