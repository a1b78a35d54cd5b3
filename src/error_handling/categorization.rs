//! Error categorization.
//!
//! Maps transport errors onto the small set of network failures a probe can report.

use std::error::Error as StdError;
use std::io::ErrorKind;

use crate::fetch::NetworkFailure;

/// Substrings that identify a certificate validation failure in rustls, OpenSSL,
/// Secure Transport and SChannel error chains (matched lowercase).
const CERTIFICATE_MARKERS: &[&str] = &[
    "certificate",
    "self signed",
    "self-signed",
    "unknownissuer",
    "notvalidforname",
];

/// Substrings for failures where no connection could be made at all.
const REFUSED_MARKERS: &[&str] = &[
    "connection refused",
    "no route to host",
    "host is unreachable",
    "network is unreachable",
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "no such host",
];

/// Categorizes a `reqwest::Error` into a `NetworkFailure`.
///
/// Checks the timeout flag first, then I/O error kinds found anywhere in the
/// source chain, then the rendered chain text.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// The `NetworkFailure` the probe should report.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> NetworkFailure {
    if error.is_timeout() {
        return NetworkFailure::Timeout;
    }

    let chain = error_chain_text(error);

    // Certificate problems surface as connect errors too, so they go first.
    if contains_any(&chain, CERTIFICATE_MARKERS) {
        return NetworkFailure::InvalidSsl;
    }

    if let Some(kind) = io_error_kind(error) {
        match kind {
            ErrorKind::TimedOut => return NetworkFailure::Timeout,
            ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::AddrNotAvailable
            | ErrorKind::NotFound => return NetworkFailure::Refused,
            _ => {}
        }
    }

    categorize_error_message(&chain)
}

/// Categorizes a rendered error message (any case).
///
/// Used for the text of error chains whose structure carries no usable
/// `io::ErrorKind`.
pub fn categorize_error_message(message: &str) -> NetworkFailure {
    let message = message.to_lowercase();
    if contains_any(&message, CERTIFICATE_MARKERS) {
        NetworkFailure::InvalidSsl
    } else if message.contains("timed out") || message.contains("timeout") {
        NetworkFailure::Timeout
    } else if contains_any(&message, REFUSED_MARKERS) {
        NetworkFailure::Refused
    } else {
        NetworkFailure::Unreachable
    }
}

/// Joins the `Display` of every error in the chain, lowercased.
fn error_chain_text(error: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(err) = source {
        parts.push(err.to_string());
        source = err.source();
    }
    parts.join(": ").to_lowercase()
}

/// Finds the first `std::io::Error` in the source chain.
fn io_error_kind(error: &(dyn StdError + 'static)) -> Option<ErrorKind> {
    let mut source = error.source();
    while let Some(err) = source {
        if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
            return Some(io_err.kind());
        }
        source = err.source();
    }
    None
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
