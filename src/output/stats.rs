//! Statistics reporting.

use chrono::{DateTime, Utc};
use console::style;
use indicatif::{HumanBytes, HumanDuration};

use crate::backup::{BackupReport, RunState};
use crate::config::ResourceKind;

const DATE_FORMAT: &str = "%d/%m/%Y";

fn size_on_disk(bytes: Option<u64>) -> String {
    bytes.map_or_else(|| "unknown".to_string(), |b| HumanBytes(b).to_string())
}

/// Summary lines of one resource run.
pub fn run_summary_lines(state: &RunState) -> Vec<String> {
    let elapsed = HumanDuration(state.elapsed);
    let size = size_on_disk(state.bytes_on_disk);

    match state.resource {
        ResourceKind::Likes => {
            let mut lines = vec![format!(
                "{} tweets and {} media assets downloaded in {}, size on disk: {}",
                state.saved, state.assets, elapsed, size
            )];
            if let (Some(first), Some(last)) = (state.first, state.last) {
                lines.push(format!(
                    "contains tweets liked between {} and {}",
                    format_date(first),
                    format_date(last)
                ));
            }
            lines
        }
        ResourceKind::Following => vec![format!(
            "{} followed users downloaded in {}, size on disk: {}",
            state.saved, elapsed, size
        )],
    }
}

fn format_date(time: DateTime<Utc>) -> String {
    time.format(DATE_FORMAT).to_string()
}

/// Indented detail lines under a run summary.
pub fn run_detail_lines(state: &RunState) -> Vec<String> {
    let mut lines = vec![format!("  Pages:          {}", state.pages)];

    if state.skipped > 0 {
        lines.push(format!("  Already stored: {}", state.skipped));
    }
    if state.assets_skipped > 0 {
        lines.push(format!(
            "  Media skipped:  {}",
            style(state.assets_skipped).yellow()
        ));
    }
    if let Some(stop) = state.stop.as_ref().filter(|s| !s.is_complete()) {
        lines.push(format!(
            "  {} {}",
            style("Stopped early:").yellow().bold(),
            stop
        ));
    }

    lines
}

/// Print the summary of one resource run.
pub fn print_run_summary(state: &RunState) {
    println!();
    for line in run_summary_lines(state) {
        println!("{}", style(line).bold());
    }
    for line in run_detail_lines(state) {
        println!("{}", line);
    }
}

/// Print statistics across all runs.
pub fn print_report(report: &BackupReport) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Backup Statistics:").bold());
    for run in report.runs() {
        println!("  {:<15} {} saved", format!("{}:", run.resource), run.saved);
    }
    if report.incomplete() > 0 {
        println!(
            "  Incomplete:     {}",
            style(report.incomplete()).red()
        );
    }
    println!("  Total:          {} saved", report.total_saved());
    println!("  Elapsed:        {}", HumanDuration(report.elapsed));
    println!("{}", style("═".repeat(50)).dim());
}
