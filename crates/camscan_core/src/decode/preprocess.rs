//! Grayscale preprocessing stages for hard-to-read frames.
//!
//! The low-end OV2640 sensor ships blurry, low-contrast frames; this
//! ladder (blur, weighted sharpen, binary threshold) recovers barcodes
//! the plain decode pass misses.

use image::{imageops, GrayImage, Luma};

/// Gaussian blur with the given sigma.
pub fn gaussian_blur(image: &GrayImage, sigma: f32) -> GrayImage {
    imageops::blur(image, sigma)
}

/// Weighted blend of the grey image against its blurred copy.
///
/// `grey_weight * grey + blur_weight * blurred`, saturating to 0..255.
/// With weights like 2.5 / -1.5 this is an unsharp mask that boosts
/// edge contrast.
pub fn sharpen(
    grey: &GrayImage,
    blurred: &GrayImage,
    grey_weight: f32,
    blur_weight: f32,
) -> GrayImage {
    debug_assert_eq!(grey.dimensions(), blurred.dimensions());

    let (width, height) = grey.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let g = grey.get_pixel(x, y)[0] as f32;
        let b = blurred.get_pixel(x, y)[0] as f32;
        let v = (g * grey_weight + b * blur_weight).clamp(0.0, 255.0);
        Luma([v.round() as u8])
    })
}

/// Binary threshold: pixels at or above `level` become white.
pub fn threshold(image: &GrayImage, level: u8) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        if image.get_pixel(x, y)[0] >= level {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}
