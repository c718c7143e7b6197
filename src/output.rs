//! CLI output formatting for all jobs.
//!
//! Each job reports through [`IconEvent`]s; this module turns them into
//! lines. Every entity follows the same two-level pattern:
//!
//! 1. **Header line**: the job, or one size table entry (edge length + label)
//! 2. **Context lines**: indented files written, pixel counts, warnings
//!
//! # Output Format
//!
//! ```text
//! remove-bg: assets/images/icon.png → assets/images/icon_transparent.png
//!     Cleared 183204 of 262144 pixels (69.9%)
//! android: assets/images/icon_transparent.png → android/app/src/main/res (5 sizes)
//!     48px mipmap-mdpi
//!         ic_launcher.png
//!         ic_launcher_round.png
//!     Error resizing image for size 72: failed to read icon.png: ...
//! ios: assets/images/icon_transparent.png → ios/.../AppIcon.appiconset (8 sizes)
//!     1024px AppIcon-1024.png
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::icons::{IconEvent, Job, ResizeSummary, SourceCheck, SourceStatus};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Last path component for display, falling back to the whole path.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Share of `part` in `total` as a one-decimal percentage.
fn percent(part: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / total as f64)
}

// ============================================================================
// Job progress
// ============================================================================

/// Format a single job event.
pub fn format_icon_event(event: &IconEvent) -> Vec<String> {
    match event {
        IconEvent::JobStarted {
            job: Job::Background,
            source,
            destination,
            ..
        } => vec![format!(
            "{}: {} \u{2192} {}",
            Job::Background,
            source.display(),
            destination.display()
        )],
        IconEvent::JobStarted {
            job,
            source,
            destination,
            entries,
        } => vec![format!(
            "{}: {} \u{2192} {} ({} sizes)",
            job,
            source.display(),
            destination.display(),
            entries
        )],
        IconEvent::BackgroundRemoved { report, .. } => vec![format!(
            "{}Cleared {} of {} pixels ({})",
            indent(1),
            report.cleared,
            report.total(),
            percent(report.cleared, report.total())
        )],
        IconEvent::IconWritten {
            size,
            label,
            outputs,
        } => {
            let mut lines = vec![format!("{}{}px {}", indent(1), size, label)];
            // A single output is already named by the label
            if outputs.len() > 1 {
                for output in outputs {
                    lines.push(format!("{}{}", indent(2), file_name(output)));
                }
            }
            lines
        }
        IconEvent::IconFailed { size, error, .. } => vec![format!(
            "{}Error resizing image for size {}: {}",
            indent(1),
            size,
            error
        )],
    }
}

/// Print a job event to stdout.
pub fn print_icon_event(event: &IconEvent) {
    for line in format_icon_event(event) {
        println!("{}", line);
    }
}

/// Format the closing line of a resizer run.
pub fn format_resize_summary(job: Job, summary: &ResizeSummary) -> Vec<String> {
    vec![format!("{}: {}", job, summary)]
}

/// Print the closing line of a resizer run.
pub fn print_resize_summary(job: Job, summary: &ResizeSummary) {
    for line in format_resize_summary(job, summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format `check` findings, one block per job.
pub fn format_check_output(checks: &[SourceCheck]) -> Vec<String> {
    let mut lines = Vec::new();

    for check in checks {
        let header = match check.largest {
            Some(largest) => format!("{} (largest icon {}px)", check.job, largest),
            None => check.job.to_string(),
        };
        lines.push(header);
        lines.push(format!("{}Source: {}", indent(1), check.path.display()));

        match &check.status {
            SourceStatus::Ready {
                dimensions,
                warnings,
            } => {
                lines.push(format!(
                    "{}{}x{}",
                    indent(1),
                    dimensions.width,
                    dimensions.height
                ));
                for warning in warnings {
                    lines.push(format!("{}warning: {}", indent(1), warning));
                }
            }
            SourceStatus::Pending => {
                lines.push(format!("{}pending (produced by {})", indent(1), Job::Background));
            }
            SourceStatus::Missing => lines.push(format!("{}missing", indent(1))),
            SourceStatus::Unreadable(error) => {
                lines.push(format!("{}unreadable: {}", indent(1), error));
            }
        }
    }

    lines
}

/// Print `check` findings to stdout.
pub fn print_check_output(checks: &[SourceCheck]) {
    for line in format_check_output(checks) {
        println!("{}", line);
    }
}
