//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: identify, key_out and resize.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use a recording mock so job logic can be exercised without
//! decoding or encoding anything.

use super::params::{KeyOutParams, ResizeParams};
use image::ImageError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest edge length a backend will render. Above this the resampling
/// buffers alone run into gigabytes.
pub const MAX_ICON_SIZE: u32 = 8192;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("invalid icon size: {0}px (expected 1 to {max})", max = MAX_ICON_SIZE)]
    InvalidSize(u32),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn is_square(self) -> bool {
        self.width == self.height
    }

    pub fn short_edge(self) -> u32 {
        self.width.min(self.height)
    }
}

/// Outcome of a background removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutReport {
    pub width: u32,
    pub height: u32,
    /// Number of pixels replaced with transparent white.
    pub cleared: u64,
}

impl KeyOutReport {
    pub fn total(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions without a full decode.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode, key out the background and write a PNG.
    fn key_out(&self, params: &KeyOutParams) -> Result<KeyOutReport, BackendError>;

    /// Decode, resample to `size × size` and write a PNG to every output.
    ///
    /// Sizes outside `1..=MAX_ICON_SIZE` are rejected before anything is read.
    ///
    /// Parent directories of the outputs are created only after the resample
    /// succeeded, so a bad source leaves nothing behind on disk.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}
