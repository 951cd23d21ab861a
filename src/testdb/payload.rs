//! Synthetic preview payload generation
//!
//! Generates the byte payloads mock tools hand back: valid PNG and JPEG
//! images (valid by construction, since they are encoded through the same
//! decoder stack the pipeline uses) and a malformed payload for the decode
//! failure path.
//!
//! Content is deterministic per seed so scenarios and assertions are
//! reproducible without carrying fixture files in the repository.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};

/// Generate deterministic pseudo-random bytes from a seed
fn noise_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    let mut current = hasher.finish();

    (0..len)
        .map(|_| {
            current = current.wrapping_mul(6364136223846793005).wrapping_add(1);
            (current >> 33) as u8
        })
        .collect()
}

/// Build a noise image with the given dimensions
fn noise_image(width: u32, height: u32, seed: u64) -> DynamicImage {
    let pixels = noise_bytes((width * height * 3) as usize, seed);
    let buffer =
        RgbImage::from_raw(width, height, pixels).expect("pixel buffer length matches dimensions");
    DynamicImage::ImageRgb8(buffer)
}

/// Generate a valid PNG payload with deterministic content
pub fn png_payload(width: u32, height: u32, seed: u64) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    noise_image(width, height, seed)
        .write_to(&mut out, ImageFormat::Png)
        .expect("in-memory PNG encoding");
    out.into_inner()
}

/// Generate a valid JPEG payload with deterministic content
pub fn jpeg_payload(width: u32, height: u32, seed: u64) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    noise_image(width, height, seed)
        .write_to(&mut out, ImageFormat::Jpeg)
        .expect("in-memory JPEG encoding");
    out.into_inner()
}

/// Generate a non-empty payload that no image decoder accepts
pub fn malformed_payload() -> Vec<u8> {
    b"ExifTool Version Number : 13.29\nError : this is not an image payload\n".to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_payload_is_deterministic() {
        assert_eq!(png_payload(8, 8, 42), png_payload(8, 8, 42));
        assert_ne!(png_payload(8, 8, 42), png_payload(8, 8, 43));
    }

    #[test]
    fn test_png_payload_round_trips_dimensions() {
        let bytes = png_payload(12, 7, 1);
        let image = image::load_from_memory(&bytes).unwrap();
        assert_eq!(image.width(), 12);
        assert_eq!(image.height(), 7);
    }

    #[test]
    fn test_malformed_payload_does_not_decode() {
        assert!(image::load_from_memory(&malformed_payload()).is_err());
        assert!(!malformed_payload().is_empty());
    }
}
