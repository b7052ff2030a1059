//! # Image Processing Pipeline
//!
//! Decode, downscale to the category's display budget, re-encode lossy.
//!
//! Catalog pages render product images at card size; anything larger than
//! the per-category budget is wasted bytes. Images are scaled down
//! preserving aspect ratio and NEVER scaled up — a small source stays at
//! its native resolution and is only re-encoded.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use tracing::debug;

use crate::error::ImageResult;
use folio_core::ProductCategory;

/// Fixed lossy quality for re-encoded product images.
const JPEG_QUALITY: u8 = 85;

/// Display budget per category, in pixels (width, height).
///
/// Notebook cards are portrait (3:4 wells), book cards are square.
pub fn max_dimensions(category: ProductCategory) -> (u32, u32) {
    match category {
        ProductCategory::IllustratedBook => (500, 500),
        ProductCategory::Notebook => (500, 750),
    }
}

/// A processed image ready for upload.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    /// JPEG-encoded bytes.
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decodes `input`, scales it to fit the category budget (down only), and
/// re-encodes it as JPEG at a fixed quality.
pub fn process_image(input: &[u8], category: ProductCategory) -> ImageResult<ProcessedImage> {
    let decoded = image::load_from_memory(input)?;
    let (max_w, max_h) = max_dimensions(category);
    let (target_w, target_h) = fit_within(decoded.width(), decoded.height(), max_w, max_h);

    let resized = if (target_w, target_h) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        debug!(
            from = %format!("{}x{}", decoded.width(), decoded.height()),
            to = %format!("{}x{}", target_w, target_h),
            "downscaling image"
        );
        decoded.resize_exact(target_w, target_h, FilterType::Lanczos3)
    };

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), JPEG_QUALITY);
    resized.write_with_encoder(encoder)?;

    Ok(ProcessedImage {
        bytes,
        width: target_w,
        height: target_h,
    })
}

/// Largest (width, height) that fits inside (max_w, max_h) preserving
/// aspect ratio, never exceeding the source size.
fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width <= max_w && height <= max_h {
        return (width, height);
    }
    let scale = f64::min(max_w as f64 / width as f64, max_h as f64 / height as f64);
    let w = ((width as f64 * scale).round() as u32).max(1);
    let h = ((height as f64 * scale).round() as u32).max(1);
    (w, h)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_fit_within_scales_down_preserving_aspect() {
        assert_eq!(fit_within(1000, 400, 500, 500), (500, 200));
        assert_eq!(fit_within(400, 1000, 500, 500), (200, 500));
        assert_eq!(fit_within(2000, 3000, 500, 750), (500, 750));
    }

    #[test]
    fn test_fit_within_never_upscales() {
        assert_eq!(fit_within(300, 200, 500, 500), (300, 200));
        assert_eq!(fit_within(500, 750, 500, 750), (500, 750));
    }

    #[test]
    fn test_process_downscales_oversized_book_image() {
        let processed =
            process_image(&png_bytes(1000, 400), ProductCategory::IllustratedBook).unwrap();

        assert_eq!((processed.width, processed.height), (500, 200));
        // JPEG magic bytes
        assert_eq!(&processed.bytes[..2], &[0xFF, 0xD8]);
        let reloaded = image::load_from_memory(&processed.bytes).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (500, 200));
    }

    #[test]
    fn test_process_keeps_small_image_at_native_size() {
        let processed = process_image(&png_bytes(120, 80), ProductCategory::Notebook).unwrap();

        assert_eq!((processed.width, processed.height), (120, 80));
    }

    #[test]
    fn test_notebook_budget_is_portrait() {
        let processed = process_image(&png_bytes(1000, 1500), ProductCategory::Notebook).unwrap();

        assert_eq!((processed.width, processed.height), (500, 750));
    }

    #[test]
    fn test_undecodable_input_is_an_error() {
        let result = process_image(b"definitely not an image", ProductCategory::Notebook);
        assert!(matches!(result, Err(crate::error::ImageError::Processing(_))));
    }
}
