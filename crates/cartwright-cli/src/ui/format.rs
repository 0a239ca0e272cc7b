//! Sizes, durations and build cycle summaries.

use cartwright_bundler::CycleReport;
use console::Term;
use owo_colors::OwoColorize;
use std::time::Duration;

/// Human-readable size using binary units.
///
/// ```
/// use cartwright_cli::ui::format_size;
///
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Human-readable duration: `ms` below a second, `m s` above a minute.
///
/// ```
/// use std::time::Duration;
/// use cartwright_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    }
}

/// Lines describing one finished build cycle, without styling.
pub fn cycle_summary_lines(report: &CycleReport) -> Vec<String> {
    let header = match (report.header.len(), report.header_from_config) {
        (0, _) => "no metadata header".to_string(),
        (n, true) => format!("{n} header lines from config"),
        (n, false) => format!("{n} header lines"),
    };
    let mut lines = vec![
        format!(
            "bundle    {} ({})",
            report.bundle.out_file.display(),
            format_size(report.bundle.bytes as u64)
        ),
        format!(
            "game      {} ({}{})",
            report.artifact.path.display(),
            format_size(report.artifact.bytes as u64),
            if report.artifact.minified { ", minified" } else { "" }
        ),
        format!("metadata  {header}"),
    ];
    if report.bundle.warnings > 0 {
        lines.push(format!("warnings  {}", report.bundle.warnings));
    }
    lines
}

/// Print a short summary of a build cycle to stderr.
pub fn print_cycle_summary(report: &CycleReport) {
    let width = Term::stderr().size().1 as usize;
    let rule = "─".repeat(width.clamp(20, 60));

    eprintln!("{}", rule.dimmed());
    for line in cycle_summary_lines(report) {
        let (label, rest) = line.split_at(10);
        eprintln!("  {} {}", "▸".blue(), format!("{}{}", label.bold(), rest));
    }
    eprintln!(
        "  {} {}",
        "built in".dimmed(),
        format_duration(report.duration).green()
    );
    eprintln!("{}", rule.dimmed());
}
