//! Signature tables for content classification.
//!
//! All phrases are lowercase; bodies are lowercased before matching.

/// Markup that only appears on Cloudflare's own error page wrapper.
pub const CLOUDFLARE_ERROR_MARKERS: &[&str] = &[
    "cf-error-details",
    "cf-wrapper",
    "cf-error-overview",
    "cf-error-type",
    "cf-error-code",
];

/// Numeric error titles printed on Cloudflare error pages.
pub const CLOUDFLARE_ERROR_PHRASES: &[&str] = &[
    "error 520",
    "error 521",
    "error 522",
    "error 523",
    "error 524",
    "error 525",
    "error 526",
    "error 527",
    "error 530",
    "error 1000",
    "error 1001",
    "error 1016",
];

/// Identifiers of Cloudflare challenge and bot-check pages.
pub const CLOUDFLARE_CHALLENGE_IDENTIFIERS: &[&str] = &[
    "cf-browser-verification",
    "cf_chl_opt",
    "__cf_chl_",
    "cf-challenge",
    "challenges.cloudflare.com",
    "attention required! | cloudflare",
];

/// Browser checks and block pages of common WAFs.
pub const WAF_PHRASES: &[&str] = &[
    "checking your browser before accessing",
    "checking if the site connection is secure",
    "please enable javascript and cookies to continue",
    "verify you are human",
    "ddos protection by",
    "request unsuccessful. incapsula incident id",
    "sucuri website firewall",
    "the requested url was rejected. please consult with your administrator",
    "access denied | ",
    "pardon our interruption",
    "are you a robot?",
];

/// Parked domains, registrar landing pages and default server/panel pages.
pub const PLACEHOLDER_PHRASES: &[&str] = &[
    "this domain is parked",
    "domain is parked",
    "parked free, courtesy of",
    "buy this domain",
    "this domain may be for sale",
    "this domain is for sale",
    "is for sale!",
    "domain for sale",
    "sedoparking",
    "parkingcrew",
    "bodis.com",
    "welcome to nginx!",
    "apache2 ubuntu default page",
    "apache2 debian default page",
    "test page for the apache http server",
    "it works!</h1>",
    "iis windows server",
    "default web site page",
    "there is no website configured at this address",
    "future home of something quite cool",
    "web hosting default page",
    "plesk default page",
    "site not found · github pages",
];

/// The pattern tables a classifier checks bodies against.
///
/// Read-only after construction. `Default` gives the built-in tables.
#[derive(Debug, Clone)]
pub struct ContentPatterns {
    /// Cloudflare error wrapper markup
    pub cloudflare_error_markers: &'static [&'static str],
    /// Error titles; only checked when a wrapper marker is present
    pub cloudflare_error_phrases: &'static [&'static str],
    /// Cloudflare challenge pages
    pub cloudflare_challenge_identifiers: &'static [&'static str],
    /// Other WAF and bot-check pages
    pub waf_phrases: &'static [&'static str],
    /// Parked and default pages
    pub placeholder_phrases: &'static [&'static str],
}

impl Default for ContentPatterns {
    fn default() -> Self {
        Self {
            cloudflare_error_markers: CLOUDFLARE_ERROR_MARKERS,
            cloudflare_error_phrases: CLOUDFLARE_ERROR_PHRASES,
            cloudflare_challenge_identifiers: CLOUDFLARE_CHALLENGE_IDENTIFIERS,
            waf_phrases: WAF_PHRASES,
            placeholder_phrases: PLACEHOLDER_PHRASES,
        }
    }
}

/// First phrase from `phrases` found in `haystack`, if any.
pub(crate) fn find_phrase<'a>(haystack: &str, phrases: &[&'a str]) -> Option<&'a str> {
    phrases.iter().copied().find(|phrase| haystack.contains(phrase))
}
