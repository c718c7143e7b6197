//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides which files to produce) and the [`backend`](super::backend)
//! (which does the actual pixel work). Tests swap in a mock backend without
//! touching operation logic.
//!
//! ## Types
//!
//! - [`KeyOutParams`]: background removal (source, output path, chroma key).
//! - [`ResizeParams`]: one square resample written to one or more output paths.

use super::chroma::ChromaKey;
use std::path::PathBuf;

/// Parameters for a background removal.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyOutParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub key: ChromaKey,
}

/// Parameters for a square resize.
///
/// The source is decoded and resampled once; the identical result is written
/// to every path in `outputs`, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub outputs: Vec<PathBuf>,
    /// Edge length of the square output in pixels.
    pub size: u32,
}
