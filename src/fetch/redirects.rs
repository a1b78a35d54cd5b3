//! HTTP redirect chain resolution.
//!
//! Follows redirects manually so that every hop is visible, with a visited
//! set for cycle detection and a hop bound for endless chains.

use std::collections::HashSet;

use log::{debug, warn};
use reqwest::Url;

use crate::fetch::outcome::{HttpResponse, NetworkFailure, ProbeOutcome};
use crate::fetch::request::Fetch;

/// How a redirect chain ended.
#[derive(Debug, Clone)]
pub enum RedirectOutcome {
    /// A response that is not a followable redirect
    Final {
        /// URL that produced the response
        url: Url,
        /// The response itself
        response: HttpResponse,
        /// Redirects followed before reaching it
        hops: usize,
    },
    /// A fetch failed below HTTP
    Failed {
        /// URL whose request failed
        url: Url,
        /// What went wrong
        failure: NetworkFailure,
        /// Redirects followed before the failure
        hops: usize,
    },
    /// A redirect pointed back at a URL already fetched
    Cycle {
        /// The revisited URL
        url: Url,
        /// Redirects followed before the repeat
        hops: usize,
    },
    /// The request bound was reached while still redirecting
    Exhausted {
        /// Redirects followed
        hops: usize,
    },
}

impl RedirectOutcome {
    /// Whether the chain failed on its very first request with a connection failure.
    pub fn is_initial_connection_failure(&self) -> bool {
        matches!(
            self,
            RedirectOutcome::Failed { failure, hops: 0, .. } if failure.is_connection_failure()
        )
    }
}

/// Resolves a `Location` value against the URL that returned it.
///
/// Absolute locations replace the URL, relative ones (`/path`, `../x`,
/// `//host/path`) are joined onto it.
pub fn resolve_location(current: &Url, location: &str) -> Option<Url> {
    current.join(location.trim()).ok()
}

/// Follows the redirect chain starting at `start_url`.
///
/// # Arguments
///
/// * `start_url` - The initial URL to start from
/// * `max_hops` - Maximum number of requests in the chain
/// * `fetcher` - Performs the individual requests
///
/// # Returns
///
/// The `RedirectOutcome` describing where the chain ended. At most `max_hops`
/// requests are made.
pub async fn follow_redirects<F: Fetch + ?Sized>(
    start_url: Url,
    max_hops: usize,
    fetcher: &F,
) -> RedirectOutcome {
    let mut visited: HashSet<Url> = HashSet::new();
    let mut current = start_url;
    let mut hops = 0;

    while hops < max_hops {
        if !visited.insert(current.clone()) {
            debug!("Redirect cycle at {current} after {hops} hop(s)");
            return RedirectOutcome::Cycle { url: current, hops };
        }

        let response = match fetcher.fetch(&current).await {
            ProbeOutcome::Failure(failure) => {
                return RedirectOutcome::Failed {
                    url: current,
                    failure,
                    hops,
                }
            }
            ProbeOutcome::Response(response) => response,
        };

        if response.is_redirect_status() {
            if let Some(location) = response.location() {
                match resolve_location(&current, location) {
                    Some(next) => {
                        debug!(
                            "{} redirect {} -> {}",
                            response.status, current, next
                        );
                        current = next;
                        hops += 1;
                        continue;
                    }
                    None => {
                        warn!(
                            "Redirect status {} for {} has unusable Location {:?}",
                            response.status, current, location
                        );
                    }
                }
            }
        }

        return RedirectOutcome::Final {
            url: current,
            response,
            hops,
        };
    }

    debug!("Gave up after {hops} redirect(s), last target {current}");
    RedirectOutcome::Exhausted { hops }
}
