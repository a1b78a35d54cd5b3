// Shared test doubles for the `Resolve` and `Fetch` seams.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, LOCATION};
use reqwest::Url;

use crate::dns::Resolve;
use crate::fetch::{Fetch, HttpResponse, NetworkFailure, ProbeOutcome};

/// Resolver with fixed answers per address family.
pub(crate) struct ScriptedResolver {
    ipv4: bool,
    ipv6: bool,
    pub(crate) ipv4_calls: AtomicUsize,
    pub(crate) ipv6_calls: AtomicUsize,
}

impl ScriptedResolver {
    pub(crate) fn new(ipv4: bool, ipv6: bool) -> Self {
        Self {
            ipv4,
            ipv6,
            ipv4_calls: AtomicUsize::new(0),
            ipv6_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn resolving() -> Self {
        Self::new(true, false)
    }

    pub(crate) fn dead() -> Self {
        Self::new(false, false)
    }
}

#[async_trait]
impl Resolve for ScriptedResolver {
    async fn resolves_ipv4(&self, _host: &str) -> bool {
        self.ipv4_calls.fetch_add(1, Ordering::SeqCst);
        self.ipv4
    }

    async fn resolves_ipv6(&self, _host: &str) -> bool {
        self.ipv6_calls.fetch_add(1, Ordering::SeqCst);
        self.ipv6
    }
}

type Fallback = Box<dyn Fn(&Url) -> ProbeOutcome + Send + Sync>;

/// Fetcher that answers from a URL → outcome table and records every request.
///
/// URLs missing from the table go to the fallback, which refuses the
/// connection unless replaced.
pub(crate) struct ScriptedFetcher {
    routes: HashMap<String, ProbeOutcome>,
    fallback: Fallback,
    requests: Mutex<Vec<Url>>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self {
            routes: HashMap::new(),
            fallback: Box::new(|_| ProbeOutcome::Failure(NetworkFailure::Refused)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn route(mut self, url: &str, outcome: ProbeOutcome) -> Self {
        let key = Url::parse(url).expect("test route must be a valid URL").to_string();
        self.routes.insert(key, outcome);
        self
    }

    pub(crate) fn with_fallback(
        mut self,
        fallback: impl Fn(&Url) -> ProbeOutcome + Send + Sync + 'static,
    ) -> Self {
        self.fallback = Box::new(fallback);
        self
    }

    pub(crate) fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Fetch for ScriptedFetcher {
    async fn fetch(&self, url: &Url) -> ProbeOutcome {
        self.requests.lock().unwrap().push(url.clone());
        match self.routes.get(url.as_str()) {
            Some(outcome) => outcome.clone(),
            None => (self.fallback)(url),
        }
    }
}

/// A response with the given status and body.
pub(crate) fn page(status: u16, body: &str) -> ProbeOutcome {
    ProbeOutcome::Response(HttpResponse::new(status, body))
}

/// A redirect response pointing at `location`.
pub(crate) fn redirect(status: u16, location: &str) -> ProbeOutcome {
    let mut response = HttpResponse::new(status, "");
    response.headers.insert(
        LOCATION,
        HeaderValue::from_str(location).expect("test location must be a valid header"),
    );
    ProbeOutcome::Response(response)
}

pub(crate) fn failure(kind: NetworkFailure) -> ProbeOutcome {
    ProbeOutcome::Failure(kind)
}
