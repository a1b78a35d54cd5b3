//! Report rendering.
//!
//! Text output is for people watching a CI log; `render_json` is for tools.
//! Neither format is a stable contract.

use std::fmt::Write;

use colored::*;
use strum::IntoEnumIterator;

use crate::status::{DomainResult, DomainStatus};

/// One progress line, printed as each domain is checked.
pub fn format_result_line(result: &DomainResult) -> String {
    format!(
        "{} {}: {}",
        result.status().icon(),
        result.domain(),
        result.status()
    )
}

/// Counts results per status, in `DomainStatus` declaration order.
///
/// Statuses with no results are left out.
pub fn count_by_status(results: &[DomainResult]) -> Vec<(DomainStatus, usize)> {
    DomainStatus::iter()
        .map(|status| {
            let count = results.iter().filter(|r| r.status() == status).count();
            (status, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Renders the end-of-run summary: counts, problem listing and verdict.
pub fn render_summary(results: &[DomainResult]) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", "Summary".bold());
    for (status, count) in count_by_status(results) {
        let line = format!("  {} {}: {}", status.icon(), status, count);
        let _ = writeln!(out, "{}", paint(status, line));
    }
    let _ = writeln!(out, "  Total: {}", results.len());

    let problems: Vec<&DomainResult> = results.iter().filter(|r| !r.accessible()).collect();

    if !problems.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Problems".bold());
        for status in DomainStatus::iter().filter(|s| !s.is_valid()) {
            let domains: Vec<&str> = problems
                .iter()
                .filter(|r| r.status() == status)
                .map(|r| r.domain())
                .collect();
            if domains.is_empty() {
                continue;
            }
            let _ = writeln!(out, "  {} {}", status.icon(), paint(status, status.to_string()));
            for domain in domains {
                let _ = writeln!(out, "    - {domain}");
            }
        }
    }

    let _ = writeln!(out);
    let verdict = if results.is_empty() {
        "No domains to check".yellow()
    } else if problems.is_empty() {
        format!("✅ All {} domains are valid", results.len()).green()
    } else {
        format!("❌ {} problematic domain(s) found", problems.len()).red()
    };
    let _ = write!(out, "{verdict}");

    out
}

/// Renders all results as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns a `serde_json::Error` if serialization fails.
pub fn render_json(results: &[DomainResult]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(results)
}

fn paint(status: DomainStatus, text: String) -> ColoredString {
    match status {
        DomainStatus::Valid => text.green(),
        DomainStatus::Placeholder | DomainStatus::EmptyPage | DomainStatus::JsOnly => {
            text.yellow()
        }
        DomainStatus::Protected | DomainStatus::RedirectLoop | DomainStatus::Unknown => {
            text.magenta()
        }
        _ => text.red(),
    }
}
