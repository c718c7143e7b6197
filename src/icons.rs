//! Icon jobs: background removal and the Android / iOS launcher sets.
//!
//! Each job reads one source image and writes PNGs. The jobs are independent;
//! they are chained only by convention, the resizers' default source being
//! the remover's default output. [`build`] makes that chain explicit.
//!
//! ## Error tiers
//!
//! - **Fatal**: an unreadable remover input, an output root that cannot be
//!   created. These return `Err` and stop the job.
//! - **Per entry**: anything that goes wrong rendering a single size table
//!   entry (missing or corrupt source, size `0`, a failed write). The entry is
//!   recorded as failed, a [`IconEvent::IconFailed`] is emitted, and the loop
//!   moves on. A run where every entry failed is still `Ok`.
//!
//! ## Output Structure
//!
//! ```text
//! android/app/src/main/res/
//! ├── mipmap-mdpi/
//! │   ├── ic_launcher.png          # 48×48
//! │   └── ic_launcher_round.png    # 48×48
//! ├── mipmap-hdpi/                 # 72×72
//! └── ...
//!
//! ios/StriverApp/Images.xcassets/AppIcon.appiconset/
//! ├── AppIcon-1024.png
//! ├── AppIcon-20-20-@2x.png        # 40×40
//! └── ...
//! ```
//!
//! Entries are processed one at a time, in table order, and the source is
//! decoded afresh for every entry.

use crate::config::{AndroidConfig, BackgroundConfig, IconConfig, IosConfig};
use crate::imaging::{
    BackendError, ChromaKey, Dimensions, IconTarget, ImageBackend, KeyOutReport, RustBackend,
    get_dimensions, plan_android, plan_ios, remove_background as key_out_background, render_icon,
};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IconError {
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which of the three jobs an event or finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Background,
    Android,
    Ios,
}

impl Job {
    pub fn name(self) -> &'static str {
        match self {
            Job::Background => "remove-bg",
            Job::Android => "android",
            Job::Ios => "ios",
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Progress reported while a job runs.
#[derive(Debug, Clone, PartialEq)]
pub enum IconEvent {
    JobStarted {
        job: Job,
        source: PathBuf,
        destination: PathBuf,
        /// Table entries to render; `1` for the remover.
        entries: usize,
    },
    BackgroundRemoved {
        output: PathBuf,
        report: KeyOutReport,
    },
    IconWritten {
        size: u32,
        label: String,
        outputs: Vec<PathBuf>,
    },
    IconFailed {
        size: u32,
        label: String,
        error: String,
    },
}

fn emit(events: Option<&Sender<IconEvent>>, event: IconEvent) {
    if let Some(tx) = events {
        // A closed receiver only means nobody is printing
        let _ = tx.send(event);
    }
}

/// A table entry that was rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenIcon {
    pub size: u32,
    pub label: String,
    pub outputs: Vec<PathBuf>,
}

/// A table entry that failed, with the rendered error message.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedIcon {
    pub size: u32,
    pub label: String,
    pub error: String,
}

/// Outcome of one resizer run. Partial success is a normal outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResizeSummary {
    pub written: Vec<WrittenIcon>,
    pub failed: Vec<FailedIcon>,
}

impl ResizeSummary {
    /// Number of files written across all entries.
    pub fn file_count(&self) -> usize {
        self.written.iter().map(|w| w.outputs.len()).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for ResizeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sizes written ({} files), {} failed",
            self.written.len(),
            self.file_count(),
            self.failed.len()
        )
    }
}

// ============================================================================
// Background removal
// ============================================================================

/// Key out the background using the production backend.
pub fn remove_background(
    config: &BackgroundConfig,
    events: Option<&Sender<IconEvent>>,
) -> Result<KeyOutReport, IconError> {
    remove_background_with_backend(&RustBackend::new(), config, events)
}

/// Key out the background using a specific backend (allows testing with mock).
///
/// Every failure is fatal here: there is only one image to produce.
pub fn remove_background_with_backend(
    backend: &impl ImageBackend,
    config: &BackgroundConfig,
    events: Option<&Sender<IconEvent>>,
) -> Result<KeyOutReport, IconError> {
    emit(
        events,
        IconEvent::JobStarted {
            job: Job::Background,
            source: config.input.clone(),
            destination: config.output.clone(),
            entries: 1,
        },
    );

    let report = key_out_background(
        backend,
        &config.input,
        &config.output,
        ChromaKey::new(config.floor),
    )?;

    emit(
        events,
        IconEvent::BackgroundRemoved {
            output: config.output.clone(),
            report,
        },
    );
    Ok(report)
}

// ============================================================================
// Resizers
// ============================================================================

/// Render the Android launcher set using the production backend.
pub fn resize_android(
    config: &AndroidConfig,
    events: Option<&Sender<IconEvent>>,
) -> Result<ResizeSummary, IconError> {
    resize_android_with_backend(&RustBackend::new(), config, events)
}

/// Render the Android launcher set into `mipmap-<qualifier>` directories.
pub fn resize_android_with_backend(
    backend: &impl ImageBackend,
    config: &AndroidConfig,
    events: Option<&Sender<IconEvent>>,
) -> Result<ResizeSummary, IconError> {
    let targets = plan_android(&config.res_dir, &config.densities, &config.launcher_names);
    run_resizer(
        backend,
        Job::Android,
        &config.source,
        &config.res_dir,
        &targets,
        events,
    )
}

/// Render the iOS App Icon set using the production backend.
pub fn resize_ios(
    config: &IosConfig,
    events: Option<&Sender<IconEvent>>,
) -> Result<ResizeSummary, IconError> {
    resize_ios_with_backend(&RustBackend::new(), config, events)
}

/// Render the iOS App Icon set flat into the output directory.
pub fn resize_ios_with_backend(
    backend: &impl ImageBackend,
    config: &IosConfig,
    events: Option<&Sender<IconEvent>>,
) -> Result<ResizeSummary, IconError> {
    let targets = plan_ios(&config.output_dir, &config.icons);
    run_resizer(
        backend,
        Job::Ios,
        &config.source,
        &config.output_dir,
        &targets,
        events,
    )
}

/// Create the output root, then render every target with per-entry recovery.
fn run_resizer(
    backend: &impl ImageBackend,
    job: Job,
    source: &Path,
    output_root: &Path,
    targets: &[IconTarget],
    events: Option<&Sender<IconEvent>>,
) -> Result<ResizeSummary, IconError> {
    std::fs::create_dir_all(output_root).map_err(|source| IconError::OutputDir {
        path: output_root.to_path_buf(),
        source,
    })?;

    emit(
        events,
        IconEvent::JobStarted {
            job,
            source: source.to_path_buf(),
            destination: output_root.to_path_buf(),
            entries: targets.len(),
        },
    );

    let mut summary = ResizeSummary::default();
    for target in targets {
        match render_icon(backend, source, target) {
            Ok(()) => {
                emit(
                    events,
                    IconEvent::IconWritten {
                        size: target.size,
                        label: target.label.clone(),
                        outputs: target.outputs.clone(),
                    },
                );
                summary.written.push(WrittenIcon {
                    size: target.size,
                    label: target.label.clone(),
                    outputs: target.outputs.clone(),
                });
            }
            Err(err) => {
                let error = err.to_string();
                emit(
                    events,
                    IconEvent::IconFailed {
                        size: target.size,
                        label: target.label.clone(),
                        error: error.clone(),
                    },
                );
                summary.failed.push(FailedIcon {
                    size: target.size,
                    label: target.label.clone(),
                    error,
                });
            }
        }
    }
    Ok(summary)
}

// ============================================================================
// Build pipeline
// ============================================================================

/// Results of a full `build`.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub background: KeyOutReport,
    pub android: ResizeSummary,
    pub ios: ResizeSummary,
}

/// Run remove-bg → android → ios with the production backend.
pub fn build(
    config: &IconConfig,
    events: Option<&Sender<IconEvent>>,
) -> Result<BuildReport, IconError> {
    build_with_backend(&RustBackend::new(), config, events)
}

/// Run all three jobs in order. A fatal error in any job stops the pipeline.
pub fn build_with_backend(
    backend: &impl ImageBackend,
    config: &IconConfig,
    events: Option<&Sender<IconEvent>>,
) -> Result<BuildReport, IconError> {
    let background = remove_background_with_backend(backend, &config.background, events)?;
    let android = resize_android_with_backend(backend, &config.android, events)?;
    let ios = resize_ios_with_backend(backend, &config.ios, events)?;
    Ok(BuildReport {
        background,
        android,
        ios,
    })
}

// ============================================================================
// Check
// ============================================================================

/// What `check` found for one job's input image.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceStatus {
    /// Readable; carries dimensions and any warnings.
    Ready {
        dimensions: Dimensions,
        warnings: Vec<String>,
    },
    /// Absent, but `remove-bg` will produce it.
    Pending,
    Missing,
    Unreadable(String),
}

/// `check` result for one job.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCheck {
    pub job: Job,
    pub path: PathBuf,
    /// Largest icon the job renders, if it renders any.
    pub largest: Option<u32>,
    pub status: SourceStatus,
}

/// Inspect every job's input without writing anything.
pub fn check(config: &IconConfig) -> Vec<SourceCheck> {
    check_with_backend(&RustBackend::new(), config)
}

/// Inspect every job's input using a specific backend.
pub fn check_with_backend(backend: &impl ImageBackend, config: &IconConfig) -> Vec<SourceCheck> {
    let android_largest = config.android.densities.iter().map(|d| d.size).max();
    let ios_largest = config.ios.icons.iter().map(|i| i.size).max();

    [
        (Job::Background, &config.background.input, None),
        (Job::Android, &config.android.source, android_largest),
        (Job::Ios, &config.ios.source, ios_largest),
    ]
    .into_iter()
    .map(|(job, path, largest)| SourceCheck {
        job,
        path: path.clone(),
        largest,
        status: inspect_source(backend, job, path, largest, &config.background.output),
    })
    .collect()
}

fn inspect_source(
    backend: &impl ImageBackend,
    job: Job,
    path: &Path,
    largest: Option<u32>,
    background_output: &Path,
) -> SourceStatus {
    if !path.exists() {
        return if job != Job::Background && path == background_output {
            SourceStatus::Pending
        } else {
            SourceStatus::Missing
        };
    }

    let dimensions = match get_dimensions(backend, path) {
        Ok(dims) => dims,
        Err(err) => return SourceStatus::Unreadable(err.to_string()),
    };

    let mut warnings = Vec::new();
    if !dimensions.is_square() {
        warnings.push(format!(
            "not square ({}x{}): icons will be stretched",
            dimensions.width, dimensions.height
        ));
    }
    if let Some(largest) = largest {
        if dimensions.short_edge() < largest {
            warnings.push(format!(
                "smaller than the largest icon ({}px): icons will be upscaled",
                largest
            ));
        }
    }
    SourceStatus::Ready {
        dimensions,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Density, IosIcon};
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn android_config(root: &Path, densities: Vec<Density>) -> AndroidConfig {
        AndroidConfig {
            source: root.join("icon.png"),
            res_dir: root.join("res"),
            densities,
            ..AndroidConfig::default()
        }
    }

    fn density(size: u32, qualifier: &str) -> Density {
        Density {
            size,
            qualifier: qualifier.to_string(),
        }
    }

    #[test]
    fn android_renders_every_density_in_order() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new();
        let config = AndroidConfig {
            res_dir: tmp.path().join("res"),
            ..AndroidConfig::default()
        };

        let summary = resize_android_with_backend(&backend, &config, None).unwrap();

        assert!(summary.is_complete());
        assert_eq!(summary.written.len(), 5);
        assert_eq!(summary.file_count(), 10);
        let sizes: Vec<u32> = backend
            .get_operations()
            .iter()
            .map(|op| match op {
                RecordedOp::Resize { size, .. } => *size,
                other => panic!("unexpected op {other:?}"),
            })
            .collect();
        assert_eq!(sizes, vec![48, 72, 96, 144, 192]);
    }

    #[test]
    fn android_creates_output_root_even_when_entries_fail() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::failing(&[48]);
        let config = android_config(tmp.path(), vec![density(48, "mdpi")]);

        let summary = resize_android_with_backend(&backend, &config, None).unwrap();

        assert!(tmp.path().join("res").is_dir());
        assert_eq!(summary.written.len(), 0);
        assert_eq!(summary.failed.len(), 1);
    }

    #[test]
    fn failing_entry_does_not_stop_the_loop() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::failing(&[72]);
        let config = android_config(
            tmp.path(),
            vec![density(48, "mdpi"), density(72, "hdpi"), density(96, "xhdpi")],
        );

        let summary = resize_android_with_backend(&backend, &config, None).unwrap();

        let written: Vec<u32> = summary.written.iter().map(|w| w.size).collect();
        assert_eq!(written, vec![48, 96]);
        assert_eq!(
            summary.failed,
            vec![FailedIcon {
                size: 72,
                label: "mipmap-hdpi".into(),
                error: "invalid icon size: 72px (expected 1 to 8192)".into(),
            }]
        );
        assert!(!summary.is_complete());
    }

    #[test]
    fn events_follow_table_order() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::failing(&[40]);
        let config = IosConfig {
            source: tmp.path().join("icon.png"),
            output_dir: tmp.path().join("set"),
            icons: vec![
                IosIcon {
                    size: 1024,
                    filename: "AppIcon-1024.png".into(),
                },
                IosIcon {
                    size: 40,
                    filename: "AppIcon-20-20-@2x.png".into(),
                },
            ],
        };
        let (tx, rx) = mpsc::channel();

        resize_ios_with_backend(&backend, &config, Some(&tx)).unwrap();
        drop(tx);
        let events: Vec<IconEvent> = rx.iter().collect();

        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            IconEvent::JobStarted { job: Job::Ios, entries: 2, .. }
        ));
        assert!(matches!(
            &events[1],
            IconEvent::IconWritten { size: 1024, label, .. } if label == "AppIcon-1024.png"
        ));
        assert!(matches!(
            &events[2],
            IconEvent::IconFailed { size: 40, .. }
        ));
    }

    #[test]
    fn output_root_failure_is_fatal() {
        let tmp = TempDir::new().unwrap();
        // A regular file where the output directory should go
        let blocker = tmp.path().join("set");
        std::fs::write(&blocker, b"").unwrap();
        let config = IosConfig {
            output_dir: blocker,
            ..IosConfig::default()
        };

        let result = resize_ios_with_backend(&MockBackend::new(), &config, None);

        assert!(matches!(result, Err(IconError::OutputDir { .. })));
    }

    #[test]
    fn remove_background_emits_start_and_result() {
        let backend = MockBackend::new();
        let config = BackgroundConfig {
            input: "/in.png".into(),
            output: "/out.png".into(),
            floor: [1, 2, 3],
        };
        let (tx, rx) = mpsc::channel();

        remove_background_with_backend(&backend, &config, Some(&tx)).unwrap();
        drop(tx);
        let events: Vec<IconEvent> = rx.iter().collect();

        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            IconEvent::JobStarted { job: Job::Background, entries: 1, .. }
        ));
        assert!(matches!(&events[1], IconEvent::BackgroundRemoved { .. }));
        assert!(matches!(
            &backend.get_operations()[0],
            RecordedOp::KeyOut { floor: [1, 2, 3], .. }
        ));
    }

    #[test]
    fn build_runs_jobs_in_order() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new();
        let mut config = IconConfig::default();
        config.resolve_paths(tmp.path());

        let report = build_with_backend(&backend, &config, None).unwrap();

        assert_eq!(report.android.written.len(), 5);
        assert_eq!(report.ios.written.len(), 8);
        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1 + 5 + 8);
        assert!(matches!(&ops[0], RecordedOp::KeyOut { .. }));
        assert!(matches!(&ops[1], RecordedOp::Resize { size: 48, .. }));
        assert!(matches!(&ops[6], RecordedOp::Resize { size: 1024, .. }));
    }

    #[test]
    fn resize_summary_display() {
        let summary = ResizeSummary {
            written: vec![WrittenIcon {
                size: 48,
                label: "mipmap-mdpi".into(),
                outputs: vec!["a".into(), "b".into()],
            }],
            failed: vec![FailedIcon {
                size: 0,
                label: "mipmap-ldpi".into(),
                error: "invalid icon size: 0px".into(),
            }],
        };
        assert_eq!(summary.to_string(), "1 sizes written (2 files), 1 failed");
    }

    // =========================================================================
    // Check
    // =========================================================================

    #[test]
    fn check_reports_pending_resizer_sources() {
        let tmp = TempDir::new().unwrap();
        let mut config = IconConfig::default();
        config.resolve_paths(tmp.path());

        let checks = check_with_backend(&MockBackend::new(), &config);

        assert_eq!(checks.len(), 3);
        assert_eq!(checks[0].status, SourceStatus::Missing);
        assert_eq!(checks[1].status, SourceStatus::Pending);
        assert_eq!(checks[2].status, SourceStatus::Pending);
        assert_eq!(checks[1].largest, Some(192));
        assert_eq!(checks[2].largest, Some(1024));
    }

    #[test]
    fn check_warns_about_non_square_and_small_sources() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("icon.png");
        std::fs::write(&source, b"").unwrap();
        let mut config = IconConfig::default();
        config.background.input = source.clone();
        config.android.source = source.clone();
        config.ios.source = source;

        // identify results are popped from the back
        let backend = MockBackend::with_dimensions(vec![
            Dimensions {
                width: 2048,
                height: 2048,
            },
            Dimensions {
                width: 150,
                height: 100,
            },
            Dimensions {
                width: 512,
                height: 512,
            },
        ]);
        let checks = check_with_backend(&backend, &config);

        assert!(matches!(
            &checks[0].status,
            SourceStatus::Ready { warnings, .. } if warnings.is_empty()
        ));
        match &checks[1].status {
            SourceStatus::Ready { warnings, .. } => {
                assert_eq!(warnings.len(), 2);
                assert!(warnings[0].starts_with("not square (150x100)"));
                assert!(warnings[1].contains("192px"));
            }
            other => panic!("unexpected status {other:?}"),
        }
        assert!(matches!(
            &checks[2].status,
            SourceStatus::Ready { warnings, .. } if warnings.is_empty()
        ));
    }
}
