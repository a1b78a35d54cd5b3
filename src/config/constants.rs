//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, size limits, and redirect bounds.

use std::ops::RangeInclusive;

/// Default domain list read when `--domains` is not given
pub const DEFAULT_DOMAINS_FILE: &str = "domains.txt";

/// Category assigned to entries that appear before any `[section]` header
pub const DEFAULT_CATEGORY: &str = "general";

// Network operation timeouts
/// Overall per-request timeout in seconds (connect + headers + body prefix)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// DNS attempts per query before the lookup is reported as failed
pub const DNS_ATTEMPTS: usize = 2;

/// Default User-Agent string for HTTP requests.
///
/// Browser-like, so WAFs serve the same page a human reader would get.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Response and body size limits
/// Maximum number of body bytes kept for content classification (8KB)
/// Parked pages, WAF interstitials and error wrappers all announce themselves early
pub const MAX_BODY_PREFIX_BYTES: usize = 8 * 1024;

// Redirect handling
/// Maximum number of redirect hops followed per protocol attempt
pub const MAX_REDIRECTS: usize = 5;

// HTTP status codes
/// Cloudflare edge errors (web server down, connection timed out, origin unreachable,
/// timeout occurred, SSL handshake failed)
pub const CLOUDFLARE_EDGE_ERROR_CODES: RangeInclusive<u16> = 521..=525;
