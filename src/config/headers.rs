//! HTTP header name constants.
//!
//! Headers inspected while classifying a response.

/// Redirect target
pub const HEADER_LOCATION: &str = "location";

// CDN/WAF identification
/// Cloudflare ray id, present on every response proxied by Cloudflare
pub const HEADER_CF_RAY: &str = "cf-ray";
/// Set by Cloudflare when the response is a challenge rather than origin content
pub const HEADER_CF_MITIGATED: &str = "cf-mitigated";
