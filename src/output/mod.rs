//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - A spinner for waits
//! - Statistics reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    print_banner, print_config_summary, print_error, print_info, print_success, print_warning,
};
pub use progress::create_spinner;
pub use stats::{print_report, print_run_summary, run_detail_lines, run_summary_lines};
