//! Domain status categories and per-domain results.

use std::fmt;

use serde::Serialize;
use strum_macros::EnumIter;

/// Final classification of one domain.
///
/// Declaration order is the order used in the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainStatus {
    /// Resolves, answers, and serves real content
    Valid,
    /// Parked domain or default web-server/hosting page
    Placeholder,
    /// 2xx response with nothing visible on it
    EmptyPage,
    /// Nothing visible except script (JS redirect shims, unrendered SPAs)
    JsOnly,
    /// 4xx response
    ClientError,
    /// 5xx response or a Cloudflare edge error page
    ServerError,
    /// Certificate expired, self-signed or otherwise untrusted
    InvalidSsl,
    /// Neither A nor AAAA records resolve
    Expired,
    /// Transport failure that fits no other category
    Unreachable,
    /// Connection refused or host unreachable
    Refused,
    /// No response within the timeout
    Timeout,
    /// Redirect cycle, or more hops than allowed
    RedirectLoop,
    /// WAF or bot-check interstitial instead of the site
    Protected,
    /// Reserved for states no probe path produces
    Unknown,
}

impl DomainStatus {
    /// Upper-snake label used in console output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainStatus::Valid => "VALID",
            DomainStatus::Placeholder => "PLACEHOLDER",
            DomainStatus::EmptyPage => "EMPTY_PAGE",
            DomainStatus::JsOnly => "JS_ONLY",
            DomainStatus::ClientError => "CLIENT_ERROR",
            DomainStatus::ServerError => "SERVER_ERROR",
            DomainStatus::InvalidSsl => "INVALID_SSL",
            DomainStatus::Expired => "EXPIRED",
            DomainStatus::Unreachable => "UNREACHABLE",
            DomainStatus::Refused => "REFUSED",
            DomainStatus::Timeout => "TIMEOUT",
            DomainStatus::RedirectLoop => "REDIRECT_LOOP",
            DomainStatus::Protected => "PROTECTED",
            DomainStatus::Unknown => "UNKNOWN",
        }
    }

    /// Icon shown next to the label.
    pub fn icon(&self) -> &'static str {
        match self {
            DomainStatus::Valid => "✅",
            DomainStatus::Placeholder => "🅿️",
            DomainStatus::EmptyPage => "⬜",
            DomainStatus::JsOnly => "📜",
            DomainStatus::ClientError => "🚫",
            DomainStatus::ServerError => "💥",
            DomainStatus::InvalidSsl => "🔓",
            DomainStatus::Expired => "💀",
            DomainStatus::Unreachable => "❌",
            DomainStatus::Refused => "⛔",
            DomainStatus::Timeout => "⏱️",
            DomainStatus::RedirectLoop => "🔁",
            DomainStatus::Protected => "🛡️",
            DomainStatus::Unknown => "❓",
        }
    }

    /// Whether this is `VALID`.
    pub fn is_valid(&self) -> bool {
        *self == DomainStatus::Valid
    }
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result for one domain.
///
/// Fields are private so `accessible` can only ever be derived from `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainResult {
    domain: String,
    status: DomainStatus,
    resolvable: bool,
    accessible: bool,
}

impl DomainResult {
    /// Creates a result; `accessible` follows from `status`.
    pub fn new(domain: impl Into<String>, status: DomainStatus, resolvable: bool) -> Self {
        Self {
            domain: domain.into(),
            status,
            resolvable,
            accessible: status.is_valid(),
        }
    }

    /// The domain as checked.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Final classification.
    pub fn status(&self) -> DomainStatus {
        self.status
    }

    /// Whether the name resolved over IPv4 or IPv6.
    pub fn resolvable(&self) -> bool {
        self.resolvable
    }

    /// Whether the domain serves a real site (`status == VALID`).
    pub fn accessible(&self) -> bool {
        self.accessible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_accessible_iff_valid() {
        for status in DomainStatus::iter() {
            let result = DomainResult::new("example.com", status, true);
            assert_eq!(
                result.accessible(),
                status == DomainStatus::Valid,
                "accessible mismatch for {status}"
            );
        }
    }

    #[test]
    fn test_status_order_matches_report_order() {
        let labels: Vec<&str> = DomainStatus::iter().map(|s| s.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "VALID",
                "PLACEHOLDER",
                "EMPTY_PAGE",
                "JS_ONLY",
                "CLIENT_ERROR",
                "SERVER_ERROR",
                "INVALID_SSL",
                "EXPIRED",
                "UNREACHABLE",
                "REFUSED",
                "TIMEOUT",
                "REDIRECT_LOOP",
                "PROTECTED",
                "UNKNOWN",
            ]
        );
    }

    #[test]
    fn test_serialized_labels_match_display() {
        for status in DomainStatus::iter() {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_result_serialization() {
        let result = DomainResult::new("dead.example", DomainStatus::Expired, false);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["domain"], "dead.example");
        assert_eq!(json["status"], "EXPIRED");
        assert_eq!(json["resolvable"], false);
        assert_eq!(json["accessible"], false);
    }
}
