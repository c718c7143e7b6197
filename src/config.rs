//! Project configuration module.
//!
//! Handles loading, validating, and merging `iconkit.toml`. Stock defaults
//! carry the conventional React Native project paths and the standard
//! launcher size tables, so a project with no config file needs no setup.
//!
//! ## Config File Location
//!
//! `iconkit.toml` in the project directory (`--project`, default `.`), or any
//! file passed with `--config`. Relative paths inside it resolve against the
//! project directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [background]
//! input = "assets/images/icon.png"
//! output = "assets/images/icon_transparent.png"
//! floor = [100, 200, 150]     # r, g, b: a pixel is background when all are strictly above
//!
//! [android]
//! source = "assets/images/icon_transparent.png"
//! res_dir = "android/app/src/main/res"
//! launcher_names = ["ic_launcher.png", "ic_launcher_round.png"]
//! densities = [
//!     { size = 48, qualifier = "mdpi" },
//!     { size = 72, qualifier = "hdpi" },
//!     { size = 96, qualifier = "xhdpi" },
//!     { size = 144, qualifier = "xxhdpi" },
//!     { size = 192, qualifier = "xxxhdpi" },
//! ]
//!
//! [ios]
//! source = "assets/images/icon_transparent.png"
//! output_dir = "ios/StriverApp/Images.xcassets/AppIcon.appiconset"
//! icons = [
//!     { size = 1024, filename = "AppIcon-1024.png" },
//!     # ...
//! ]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; tables merge key by key, arrays replace wholesale:
//!
//! ```toml
//! [android]
//! densities = [{ size = 48, qualifier = "mdpi" }]
//! ```
//!
//! Unknown keys are rejected to catch typos early. Sizes are deliberately not
//! validated here: a bad size fails only its own table entry at render time.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the project directory.
pub const CONFIG_FILENAME: &str = "iconkit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `iconkit.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconConfig {
    /// Background removal job.
    pub background: BackgroundConfig,
    /// Android launcher icon job.
    pub android: AndroidConfig,
    /// iOS App Icon job.
    pub ios: IosConfig,
}

/// Background removal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Per-channel `[r, g, b]` floor. Background pixels exceed all three.
    pub floor: [u8; 3],
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("assets/images/icon.png"),
            output: PathBuf::from("assets/images/icon_transparent.png"),
            floor: crate::imaging::chroma::DEFAULT_FLOOR,
        }
    }
}

/// One Android density: edge length and mipmap qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Density {
    pub size: u32,
    pub qualifier: String,
}

impl Density {
    fn new(size: u32, qualifier: &str) -> Self {
        Self {
            size,
            qualifier: qualifier.to_string(),
        }
    }
}

/// Android launcher icon settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AndroidConfig {
    pub source: PathBuf,
    /// Resource root that receives the `mipmap-*` directories.
    pub res_dir: PathBuf,
    /// File names written into every mipmap directory.
    pub launcher_names: Vec<String>,
    pub densities: Vec<Density>,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("assets/images/icon_transparent.png"),
            res_dir: PathBuf::from("android/app/src/main/res"),
            launcher_names: vec![
                "ic_launcher.png".to_string(),
                "ic_launcher_round.png".to_string(),
            ],
            densities: vec![
                Density::new(48, "mdpi"),
                Density::new(72, "hdpi"),
                Density::new(96, "xhdpi"),
                Density::new(144, "xxhdpi"),
                Density::new(192, "xxxhdpi"),
            ],
        }
    }
}

/// One iOS App Icon slot: edge length and literal file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IosIcon {
    pub size: u32,
    pub filename: String,
}

impl IosIcon {
    fn new(size: u32, filename: &str) -> Self {
        Self {
            size,
            filename: filename.to_string(),
        }
    }
}

/// iOS App Icon settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IosConfig {
    pub source: PathBuf,
    /// The `.appiconset` directory; icons are written flat into it.
    pub output_dir: PathBuf,
    pub icons: Vec<IosIcon>,
}

impl Default for IosConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("assets/images/icon_transparent.png"),
            output_dir: PathBuf::from("ios/StriverApp/Images.xcassets/AppIcon.appiconset"),
            icons: vec![
                IosIcon::new(1024, "AppIcon-1024.png"),
                IosIcon::new(40, "AppIcon-20-20-@2x.png"),
                IosIcon::new(60, "AppIcon-20-20-@3x.png"),
                IosIcon::new(58, "AppIcon-29-29-@2x.png"),
                IosIcon::new(87, "AppIcon-29-29-@3x.png"),
                IosIcon::new(80, "AppIcon-40-40-@2x.png"),
                IosIcon::new(120, "AppIcon-40-40-@3x.png"),
                IosIcon::new(180, "AppIcon-60-60-@3x.png"),
            ],
        }
    }
}

impl IconConfig {
    /// Validate names in the size tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unique_file_names(
            "android.densities qualifier",
            self.android.densities.iter().map(|d| d.qualifier.as_str()),
        )?;
        if self.android.launcher_names.is_empty() {
            return Err(ConfigError::Validation(
                "android.launcher_names must not be empty".into(),
            ));
        }
        unique_file_names(
            "android.launcher_names entry",
            self.android.launcher_names.iter().map(String::as_str),
        )?;
        unique_file_names(
            "ios.icons filename",
            self.ios.icons.iter().map(|i| i.filename.as_str()),
        )?;
        Ok(())
    }

    /// Anchor every relative path at `project_dir`. Absolute paths are kept.
    pub fn resolve_paths(&mut self, project_dir: &Path) {
        for path in [
            &mut self.background.input,
            &mut self.background.output,
            &mut self.android.source,
            &mut self.android.res_dir,
            &mut self.ios.source,
            &mut self.ios.output_dir,
        ] {
            *path = project_dir.join(&*path);
        }
    }
}

/// Reject empty, duplicate, or path-like names.
fn unique_file_names<'a>(
    what: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() || name == "." || name == ".." {
            return Err(ConfigError::Validation(format!(
                "{what} must be a non-empty name, got {name:?}"
            )));
        }
        if name.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "{what} must not contain path separators: {name:?}"
            )));
        }
        if !seen.insert(name) {
            return Err(ConfigError::Validation(format!(
                "duplicate {what}: {name:?}"
            )));
        }
    }
    Ok(())
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(IconConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<IconConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: IconConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `iconkit.toml` from the project directory, falling back to defaults.
///
/// Paths in the result are anchored at `project_dir`.
pub fn load_config(project_dir: &Path) -> Result<IconConfig, ConfigError> {
    let overlay = load_raw_config(&project_dir.join(CONFIG_FILENAME))?;
    let mut config = resolve_config(stock_defaults_value(), overlay)?;
    config.resolve_paths(project_dir);
    Ok(config)
}

/// Load an explicitly named config file. Unlike [`load_config`], a missing
/// file is an error.
pub fn load_config_file(config_path: &Path, project_dir: &Path) -> Result<IconConfig, ConfigError> {
    let content = fs::read_to_string(config_path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    let mut config = resolve_config(stock_defaults_value(), Some(overlay))?;
    config.resolve_paths(project_dir);
    Ok(config)
}

/// Returns a fully-commented stock `iconkit.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# iconkit Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Relative paths resolve against the project directory (--project, default ".").
# Tables merge key by key with the defaults; arrays replace them wholesale.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Background removal (iconkit remove-bg)
# ---------------------------------------------------------------------------
[background]
input = "assets/images/icon.png"

# Always written as PNG, whatever the extension.
output = "assets/images/icon_transparent.png"

# A pixel becomes transparent white when red, green AND blue are all strictly
# above these values. Alpha is ignored. There is no tolerance band or edge
# smoothing, and interior pixels that match are cleared too.
floor = [100, 200, 150]

# ---------------------------------------------------------------------------
# Android launcher icons (iconkit android)
# ---------------------------------------------------------------------------
[android]
source = "assets/images/icon_transparent.png"

# Resource root; one mipmap-<qualifier> directory is created per density.
res_dir = "android/app/src/main/res"

# Written into every mipmap directory with identical pixels.
launcher_names = ["ic_launcher.png", "ic_launcher_round.png"]

# Edge length in pixels -> density qualifier. Processed in order.
densities = [
    { size = 48, qualifier = "mdpi" },
    { size = 72, qualifier = "hdpi" },
    { size = 96, qualifier = "xhdpi" },
    { size = 144, qualifier = "xxhdpi" },
    { size = 192, qualifier = "xxxhdpi" },
]

# ---------------------------------------------------------------------------
# iOS App Icon set (iconkit ios)
# ---------------------------------------------------------------------------
[ios]
source = "assets/images/icon_transparent.png"

# Icons are written flat into this directory.
output_dir = "ios/StriverApp/Images.xcassets/AppIcon.appiconset"

# Edge length in pixels -> file name. Processed in order.
icons = [
    { size = 1024, filename = "AppIcon-1024.png" },
    { size = 40, filename = "AppIcon-20-20-@2x.png" },
    { size = 60, filename = "AppIcon-20-20-@3x.png" },
    { size = 58, filename = "AppIcon-29-29-@2x.png" },
    { size = 87, filename = "AppIcon-29-29-@3x.png" },
    { size = 80, filename = "AppIcon-40-40-@2x.png" },
    { size = 120, filename = "AppIcon-40-40-@3x.png" },
    { size = 180, filename = "AppIcon-60-60-@3x.png" },
]
"##
}
