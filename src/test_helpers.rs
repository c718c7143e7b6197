//! Shared test utilities for the iconkit test suite.
//!
//! Synthesizes small source images on disk and decodes what the jobs wrote.

use image::{DynamicImage, ImageEncoder, ImageFormat, ImageReader, Rgba, RgbaImage};
use std::path::Path;

// =========================================================================
// Fixture images
// =========================================================================

/// Write an RGBA gradient PNG with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

/// Write an RGB JPEG (three channels, no alpha) with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 220])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

// =========================================================================
// Output inspection
// =========================================================================

/// Decode a file, trusting its content over its extension. Panics on failure.
pub fn decode_sniffed(path: &Path) -> DynamicImage {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .unwrap_or_else(|e| panic!("failed to open {}: {e}", path.display()))
        .decode()
        .unwrap_or_else(|e| panic!("failed to decode {}: {e}", path.display()))
}

/// Decode a file into RGBA8. Panics on failure.
pub fn open_rgba(path: &Path) -> RgbaImage {
    decode_sniffed(path).to_rgba8()
}

/// Detect the actual on-disk format from file content, ignoring the extension.
pub fn sniff_format(path: &Path) -> ImageFormat {
    ImageReader::open(path)
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .format()
        .unwrap_or_else(|| panic!("unrecognized format: {}", path.display()))
}
