//! CLI output formatting.
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ```text
//! Prepared 3 photos, 1 failed
//!     front.jpg      98 KiB  q100  400x300  (main)
//!     kitchen.jpg   812 KiB  q80   1600x1200
//!     garden.jpg    1.1 MiB  q80   2048x1536  OVER BUDGET
//!     broken.jpg    FAILED: could not decode photo: ...
//! ```

use std::path::Path;

use crate::batch::BatchReport;
use crate::imaging::Orientation;

/// Format a byte count for humans: `512 B`, `98 KiB`, `1.1 MiB`.
fn human_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{} KiB", bytes / 1024)
    } else {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Format a batch report: summary line, then one line per photo in input
/// order, failures last.
pub fn format_report(report: &BatchReport) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "Prepared {} photos, {} failed",
        report.prepared.len(),
        report.failed.len()
    ));

    for entry in &report.prepared {
        let mut line = format!(
            "    {:<16} {:>8}  q{:<3}  {}x{}",
            entry.id,
            human_size(entry.bytes),
            entry.quality,
            entry.width,
            entry.height
        );
        if entry.main {
            line.push_str("  (main)");
        }
        if !entry.budget_met {
            line.push_str("  OVER BUDGET");
        }
        lines.push(line);
    }

    for failure in &report.failed {
        lines.push(format!("    {:<16} FAILED: {}", failure.id, failure.error));
    }

    lines
}

/// Print a batch report to stdout.
pub fn print_report(report: &BatchReport) {
    for line in format_report(report) {
        println!("{}", line);
    }
}

/// Format `inspect` output for a single photo.
pub fn format_inspect(
    path: &Path,
    file_bytes: usize,
    stored: (u32, u32),
    orientation: Orientation,
) -> Vec<String> {
    let (w, h) = stored;
    let (up_w, up_h) = if orientation.swaps_dimensions() {
        (h, w)
    } else {
        (w, h)
    };
    vec![
        format!("{}", path.display()),
        format!("    Size: {}", human_size(file_bytes)),
        format!("    Stored: {}x{}", w, h),
        format!("    Orientation: {:?}", orientation),
        format!("    Upright: {}x{}", up_w, up_h),
    ]
}

/// Print `inspect` output to stdout.
pub fn print_inspect(path: &Path, file_bytes: usize, stored: (u32, u32), orientation: Orientation) {
    for line in format_inspect(path, file_bytes, stored, orientation) {
        println!("{}", line);
    }
}
