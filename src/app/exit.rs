//! Exit code policy.

use crate::config::FailOn;
use crate::run::AuditReport;

/// Exit code when `--fail-on` is triggered.
pub const EXIT_PROBLEMS_FOUND: i32 = 2;

/// Maps a finished run to the process exit code.
///
/// Orchestration failures exit 1 before this is reached. With
/// `FailOn::Never` a completed run always exits 0; with
/// `FailOn::AnyProblem` any non-`VALID` domain exits 2.
pub fn evaluate_exit_code(fail_on: FailOn, report: &AuditReport) -> i32 {
    match fail_on {
        FailOn::Never => 0,
        FailOn::AnyProblem => {
            if report.problematic().is_empty() {
                0
            } else {
                EXIT_PROBLEMS_FOUND
            }
        }
    }
}
