//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, TIFF, WebP) | `image::ImageReader` with content sniffing |
//! | Identify | `ImageReader::into_dimensions` (header only) |
//! | Key out | `DynamicImage::to_rgba8` + [`ChromaKey::apply`](super::chroma::ChromaKey::apply) |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode | `save_with_format(.., ImageFormat::Png)` |
//!
//! Output is always PNG, whatever extension the output path carries.

use super::backend::{BackendError, Dimensions, ImageBackend, KeyOutReport, MAX_ICON_SIZE};
use super::params::{KeyOutParams, ResizeParams};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Backend built on the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Open a file and sniff its format from the leading bytes.
fn open_reader(path: &Path) -> Result<ImageReader<BufReader<File>>, BackendError> {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| BackendError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open_reader(path)?
        .decode()
        .map_err(|source| BackendError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Create the parent directory of `path` if it has one.
fn ensure_parent(path: &Path) -> Result<(), BackendError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| BackendError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) =
            open_reader(path)?
                .into_dimensions()
                .map_err(|source| BackendError::Decode {
                    path: path.to_path_buf(),
                    source,
                })?;
        Ok(Dimensions { width, height })
    }

    fn key_out(&self, params: &KeyOutParams) -> Result<KeyOutReport, BackendError> {
        let mut img = load_image(&params.source)?.to_rgba8();
        let cleared = params.key.apply(&mut img);

        img.save_with_format(&params.output, ImageFormat::Png)
            .map_err(|source| BackendError::Encode {
                path: params.output.clone(),
                source,
            })?;

        Ok(KeyOutReport {
            width: img.width(),
            height: img.height(),
            cleared,
        })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        if params.size == 0 || params.size > MAX_ICON_SIZE {
            return Err(BackendError::InvalidSize(params.size));
        }

        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.size, params.size, FilterType::Lanczos3);

        for output in &params.outputs {
            ensure_parent(output)?;
            resized
                .save_with_format(output, ImageFormat::Png)
                .map_err(|source| BackendError::Encode {
                    path: output.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}
