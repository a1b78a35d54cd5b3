//! Result types for a single HTTP fetch.

use reqwest::header::HeaderMap;

use crate::config::HEADER_LOCATION;
use crate::status::DomainStatus;

/// Low-level reasons a fetch produced no HTTP response at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkFailure {
    /// No response within the configured timeout
    Timeout,
    /// Connection refused, host unreachable, or the name did not resolve at the socket layer
    Refused,
    /// Expired, self-signed or otherwise untrusted certificate
    InvalidSsl,
    /// Any other transport failure
    Unreachable,
}

impl NetworkFailure {
    /// The terminal status this failure maps to.
    pub fn status(self) -> DomainStatus {
        match self {
            NetworkFailure::Timeout => DomainStatus::Timeout,
            NetworkFailure::Refused => DomainStatus::Refused,
            NetworkFailure::InvalidSsl => DomainStatus::InvalidSsl,
            NetworkFailure::Unreachable => DomainStatus::Unreachable,
        }
    }

    /// Whether the connection was never established.
    ///
    /// Only these failures let the prober move on to the next protocol.
    pub fn is_connection_failure(self) -> bool {
        matches!(self, NetworkFailure::Refused | NetworkFailure::Unreachable)
    }
}

/// A response that made it back, with at most `MAX_BODY_PREFIX_BYTES` of body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Numeric status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Leading part of the body, lossily decoded as UTF-8
    pub body_prefix: String,
}

impl HttpResponse {
    /// Builds a response with no headers.
    pub fn new(status: u16, body_prefix: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body_prefix: body_prefix.into(),
        }
    }

    /// The `Location` header, if present and valid UTF-8.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(HEADER_LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Whether this is a 3xx response.
    pub fn is_redirect_status(&self) -> bool {
        (300..=399).contains(&self.status)
    }
}

/// Outcome of fetching one URL.
#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    /// The request failed below HTTP
    Failure(NetworkFailure),
    /// The server answered
    Response(HttpResponse),
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, LOCATION};

    #[test]
    fn test_network_failure_status_mapping() {
        assert_eq!(NetworkFailure::Timeout.status(), DomainStatus::Timeout);
        assert_eq!(NetworkFailure::Refused.status(), DomainStatus::Refused);
        assert_eq!(NetworkFailure::InvalidSsl.status(), DomainStatus::InvalidSsl);
        assert_eq!(
            NetworkFailure::Unreachable.status(),
            DomainStatus::Unreachable
        );
    }

    #[test]
    fn test_only_connection_failures_allow_fallback() {
        assert!(NetworkFailure::Refused.is_connection_failure());
        assert!(NetworkFailure::Unreachable.is_connection_failure());
        assert!(!NetworkFailure::Timeout.is_connection_failure());
        assert!(!NetworkFailure::InvalidSsl.is_connection_failure());
    }

    #[test]
    fn test_location_header() {
        let mut response = HttpResponse::new(302, "");
        assert_eq!(response.location(), None);

        response
            .headers
            .insert(LOCATION, HeaderValue::from_static("/next"));
        assert_eq!(response.location(), Some("/next"));
    }

    #[test]
    fn test_redirect_status_bounds() {
        assert!(!HttpResponse::new(299, "").is_redirect_status());
        assert!(HttpResponse::new(300, "").is_redirect_status());
        assert!(HttpResponse::new(399, "").is_redirect_status());
        assert!(!HttpResponse::new(400, "").is_redirect_status());
    }
}
