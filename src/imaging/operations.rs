//! High-level image operations.
//!
//! These functions turn size tables into concrete render targets and hand
//! them to a backend. Planning is pure; only [`render_icon`] and
//! [`remove_background`] touch the backend.

use super::backend::{BackendError, Dimensions, ImageBackend, KeyOutReport};
use super::chroma::ChromaKey;
use super::params::{KeyOutParams, ResizeParams};
use crate::config::{Density, IosIcon};
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// One resample of the source, written to one or more files.
#[derive(Debug, Clone, PartialEq)]
pub struct IconTarget {
    /// Edge length in pixels.
    pub size: u32,
    /// Human-facing name for progress output (`mipmap-hdpi`, `AppIcon-1024.png`).
    pub label: String,
    pub outputs: Vec<PathBuf>,
}

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions> {
    backend.identify(path)
}

/// Directory holding launcher icons for one density: `<res>/mipmap-<qualifier>`.
pub fn mipmap_dir(res_dir: &Path, qualifier: &str) -> PathBuf {
    res_dir.join(format!("mipmap-{}", qualifier))
}

/// Plan the Android launcher set.
///
/// Each density yields one target writing every launcher name into its
/// mipmap directory. Table order is preserved.
pub fn plan_android(
    res_dir: &Path,
    densities: &[Density],
    launcher_names: &[String],
) -> Vec<IconTarget> {
    densities
        .iter()
        .map(|density| {
            let dir = mipmap_dir(res_dir, &density.qualifier);
            IconTarget {
                size: density.size,
                label: format!("mipmap-{}", density.qualifier),
                outputs: launcher_names.iter().map(|name| dir.join(name)).collect(),
            }
        })
        .collect()
}

/// Plan the iOS App Icon set: one flat file per table entry.
pub fn plan_ios(output_dir: &Path, icons: &[IosIcon]) -> Vec<IconTarget> {
    icons
        .iter()
        .map(|icon| IconTarget {
            size: icon.size,
            label: icon.filename.clone(),
            outputs: vec![output_dir.join(&icon.filename)],
        })
        .collect()
}

/// Render one target from `source`. The source is decoded afresh every call.
pub fn render_icon(backend: &impl ImageBackend, source: &Path, target: &IconTarget) -> Result<()> {
    backend.resize(&ResizeParams {
        source: source.to_path_buf(),
        outputs: target.outputs.clone(),
        size: target.size,
    })
}

/// Key out the background of `source` and write the result to `output` as PNG.
pub fn remove_background(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    key: ChromaKey,
) -> Result<KeyOutReport> {
    backend.key_out(&KeyOutParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        key,
    })
}
