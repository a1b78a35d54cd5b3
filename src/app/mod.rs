//! Console reporting and exit-code policy for the CLI.

pub mod exit;
pub mod report;

// Re-export public API
pub use exit::evaluate_exit_code;
pub use report::{count_by_status, format_result_line, render_json, render_summary};
