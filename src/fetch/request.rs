//! Single HTTP fetches.
//!
//! This module performs one GET per call (redirects are never followed here)
//! and reduces the result to a `ProbeOutcome`.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use reqwest::Url;

use crate::config::{HEADER_CF_RAY, MAX_BODY_PREFIX_BYTES};
use crate::error_handling::categorize_reqwest_error;
use crate::fetch::outcome::{HttpResponse, ProbeOutcome};

/// Fetches a single URL without following redirects.
///
/// Implementations never fail: transport problems come back as
/// `ProbeOutcome::Failure`.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Performs one GET request.
    async fn fetch(&self, url: &Url) -> ProbeOutcome;
}

/// Browser-like request headers.
///
/// Some WAFs answer header-less clients with a block page even when a browser
/// would get the real site. `Accept-Encoding` is left to reqwest so the body
/// prefix is never compressed.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
    }
}

/// `Fetch` implementation backed by a shared `reqwest::Client`.
///
/// The client must have redirects disabled (see `init_probe_client`), otherwise
/// loop detection never sees the intermediate hops.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Arc<reqwest::Client>,
    max_body_bytes: usize,
}

impl HttpFetcher {
    /// Wraps a client built by `init_probe_client`.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            max_body_bytes: MAX_BODY_PREFIX_BYTES,
        }
    }

    /// Overrides how much of each body is kept.
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Reads at most `max_body_bytes` of the body.
    ///
    /// A body that breaks off mid-stream still yields whatever arrived.
    async fn read_body_prefix(&self, url: &Url, response: &mut reqwest::Response) -> String {
        let mut buf: Vec<u8> = Vec::new();
        while buf.len() < self.max_body_bytes {
            match response.chunk().await {
                Ok(Some(chunk)) => buf.extend_from_slice(&chunk),
                Ok(None) => break,
                Err(e) => {
                    debug!("Body read for {url} stopped after {} bytes: {e}", buf.len());
                    break;
                }
            }
        }
        buf.truncate(self.max_body_bytes);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> ProbeOutcome {
        let request = RequestHeaders::apply_to_request_builder(self.client.get(url.clone()));

        let mut response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let failure = categorize_reqwest_error(&e);
                debug!("GET {url} failed ({failure:?}): {e}");
                return ProbeOutcome::Failure(failure);
            }
        };

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        if let Some(ray) = headers.get(HEADER_CF_RAY) {
            debug!("GET {url} served through Cloudflare (ray {ray:?})");
        }
        debug!("GET {url} -> {status}");

        let body_prefix = self.read_body_prefix(url, &mut response).await;

        ProbeOutcome::Response(HttpResponse {
            status,
            headers,
            body_prefix,
        })
    }
}
