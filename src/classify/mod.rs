//! Domain status classification.
//!
//! `DomainClassifier::classify` is the one operation the rest of the crate is
//! built around: DNS check, then an HTTPS/HTTP probe with manual redirect
//! following, then status-code and content inspection of the final response.
//! Every network condition ends up as a `DomainStatus`; `classify` never fails.

mod content;
mod patterns;

use std::fmt;

use log::{debug, info, warn};
use reqwest::Url;

use crate::config::MAX_REDIRECTS;
use crate::dns::{is_resolvable, Resolve};
use crate::fetch::{follow_redirects, Fetch, RedirectOutcome};
use crate::status::{DomainResult, DomainStatus};

// Re-export public API
pub use content::{classify_content, classify_response, extract_page_text, PageText};
pub use patterns::ContentPatterns;

/// Protocols a probe can use, tried in list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// TLS on port 443 unless the domain names a port
    Https,
    /// Plain HTTP
    Http,
}

impl Scheme {
    /// URL scheme name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default protocol order.
pub const DEFAULT_SCHEMES: &[Scheme] = &[Scheme::Https, Scheme::Http];

/// Classifies domains using a resolver and a fetcher.
///
/// Holds no per-domain state, so one instance serves a whole run.
pub struct DomainClassifier<R, F> {
    resolver: R,
    fetcher: F,
    patterns: ContentPatterns,
    schemes: Vec<Scheme>,
    max_redirects: usize,
}

impl<R: Resolve, F: Fetch> DomainClassifier<R, F> {
    /// Creates a classifier with the built-in patterns, HTTPS-then-HTTP and
    /// `MAX_REDIRECTS` hops.
    pub fn new(resolver: R, fetcher: F) -> Self {
        Self {
            resolver,
            fetcher,
            patterns: ContentPatterns::default(),
            schemes: DEFAULT_SCHEMES.to_vec(),
            max_redirects: MAX_REDIRECTS,
        }
    }

    /// Replaces the content signature tables.
    pub fn with_patterns(mut self, patterns: ContentPatterns) -> Self {
        self.patterns = patterns;
        self
    }

    /// Replaces the protocol order.
    pub fn with_schemes(mut self, schemes: Vec<Scheme>) -> Self {
        self.schemes = schemes;
        self
    }

    /// Replaces the per-chain request bound.
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// The DNS collaborator.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// The HTTP collaborator.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Classifies one domain.
    ///
    /// # Arguments
    ///
    /// * `domain` - Scheme-free host, optionally with `:port`
    ///
    /// # Returns
    ///
    /// Exactly one `DomainResult`. Domains that do not resolve are `EXPIRED`
    /// and are never fetched.
    pub async fn classify(&self, domain: &str) -> DomainResult {
        if !is_resolvable(domain, &self.resolver).await {
            info!("{domain}: no A or AAAA records");
            return DomainResult::new(domain, DomainStatus::Expired, false);
        }

        let status = self.probe(domain).await;
        info!("{domain}: {status}");
        DomainResult::new(domain, status, true)
    }

    /// Runs the protocol attempts in order.
    ///
    /// The next protocol is only tried when the current one could not connect
    /// on its first request. Timeouts, certificate failures, redirect loops and
    /// any HTTP response are final.
    async fn probe(&self, domain: &str) -> DomainStatus {
        let mut status = DomainStatus::Unreachable;

        for scheme in &self.schemes {
            let start_url = match Url::parse(&format!("{scheme}://{domain}/")) {
                Ok(url) => url,
                Err(e) => {
                    warn!("{domain}: cannot build a {scheme} URL: {e}");
                    return DomainStatus::Unreachable;
                }
            };

            let outcome = follow_redirects(start_url, self.max_redirects, &self.fetcher).await;
            status = self.status_for(&outcome);

            if outcome.is_initial_connection_failure() {
                debug!("{domain}: {scheme} could not connect ({status}), trying next protocol");
                continue;
            }
            return status;
        }

        status
    }

    fn status_for(&self, outcome: &RedirectOutcome) -> DomainStatus {
        match outcome {
            RedirectOutcome::Failed { failure, url, .. } => {
                debug!("{url}: {failure:?}");
                failure.status()
            }
            RedirectOutcome::Cycle { url, hops } => {
                debug!("{url}: revisited after {hops} redirect(s)");
                DomainStatus::RedirectLoop
            }
            RedirectOutcome::Exhausted { hops } => {
                debug!("Still redirecting after {hops} hop(s)");
                DomainStatus::RedirectLoop
            }
            RedirectOutcome::Final { url, response, .. } => {
                let status = classify_response(response, &self.patterns);
                debug!("{url}: HTTP {} classified as {status}", response.status);
                status
            }
        }
    }
}
