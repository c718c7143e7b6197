//! # iconkit
//!
//! Prepares app launcher icons from one square source image: keys out its
//! light background, then renders the Android mipmap set and the iOS App Icon
//! set from the result.
//!
//! # Architecture: Three Jobs
//!
//! ```text
//! 1. remove-bg  icon.png              →  icon_transparent.png   (RGBA PNG)
//! 2. android    icon_transparent.png  →  res/mipmap-*/          (2 files per density)
//! 3. ios        icon_transparent.png  →  AppIcon.appiconset/    (8 files, flat)
//! ```
//!
//! The jobs share nothing at runtime. They are chained only because the
//! resizers' default source is the remover's default output; `build` runs
//! them in that order.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`icons`] | The jobs themselves, their progress events, `build` and `check` |
//! | [`imaging`] | Backend trait, chroma key, size table planning, `image`-crate backend |
//! | [`config`] | `iconkit.toml` loading over stock defaults, validation, `gen-config` text |
//! | [`output`] | CLI output formatting for job events, summaries and `check` |
//!
//! # Design Decisions
//!
//! ## Catch and Continue
//!
//! A resizer that cannot produce one size moves on to the next. The failure is
//! reported as an event and collected in the [`icons::ResizeSummary`]; the run
//! still succeeds. Only problems that make the whole job meaningless (the
//! output root cannot be created, the remover cannot read its input) are
//! returned as errors.
//!
//! ## PNG Out, Whatever Comes In
//!
//! Inputs are decoded by content, not extension. Every output is PNG: the
//! remover always writes four channels, the resizers keep the source's
//! channel layout.

pub mod config;
pub mod icons;
pub mod imaging;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
