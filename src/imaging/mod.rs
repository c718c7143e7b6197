//! Image processing on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Key out background** | threshold [`ChromaKey`] over RGBA8 pixels |
//! | **Resize → PNG** | `resize_exact` with Lanczos3 |
//!
//! The module is split into:
//! - **Chroma**: the pure per-pixel background predicate (unit testable)
//! - **Parameters**: data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: planning size tables into targets and running them

pub mod backend;
pub mod chroma;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend, KeyOutReport, MAX_ICON_SIZE};
pub use chroma::ChromaKey;
pub use operations::{
    IconTarget, get_dimensions, mipmap_dir, plan_android, plan_ios, remove_background,
    render_icon,
};
pub use params::{KeyOutParams, ResizeParams};
pub use rust_backend::RustBackend;
