//! Hostname resolvability checks.
//!
//! This module answers one question per address family: does the name
//! resolve at all? Addresses themselves are not needed by the classifier.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use log::debug;

/// Forward DNS lookups used by the classifier.
///
/// Implemented for `hickory-resolver` in production and by scripted mocks in tests.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Whether `host` has at least one A record.
    async fn resolves_ipv4(&self, host: &str) -> bool;

    /// Whether `host` has at least one AAAA record.
    async fn resolves_ipv6(&self, host: &str) -> bool;
}

#[async_trait]
impl<T: Resolve + ?Sized> Resolve for Arc<T> {
    async fn resolves_ipv4(&self, host: &str) -> bool {
        (**self).resolves_ipv4(host).await
    }

    async fn resolves_ipv6(&self, host: &str) -> bool {
        (**self).resolves_ipv6(host).await
    }
}

#[async_trait]
impl Resolve for TokioAsyncResolver {
    async fn resolves_ipv4(&self, host: &str) -> bool {
        match self.ipv4_lookup(host).await {
            Ok(lookup) => lookup.iter().next().is_some(),
            Err(e) => {
                debug!("A lookup failed for {host}: {e}");
                false
            }
        }
    }

    async fn resolves_ipv6(&self, host: &str) -> bool {
        match self.ipv6_lookup(host).await {
            Ok(lookup) => lookup.iter().next().is_some(),
            Err(e) => {
                debug!("AAAA lookup failed for {host}: {e}");
                false
            }
        }
    }
}

/// Strips an optional `:port` suffix (and IPv6 brackets) from a domain entry.
///
/// # Examples
///
/// `example.com:8080` → `example.com`, `[::1]:443` → `::1`, `::1` → `::1`.
pub fn host_without_port(domain: &str) -> &str {
    if let Some(rest) = domain.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    // A bare IPv6 literal has several colons and no port.
    if domain.matches(':').count() > 1 {
        return domain;
    }
    match domain.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => host,
        _ => domain,
    }
}

/// Checks whether a domain resolves over IPv4, falling back to IPv6.
///
/// IP literals count as resolvable without a query.
///
/// # Arguments
///
/// * `domain` - Domain as supplied, optionally with `:port`
/// * `resolver` - The DNS resolver instance
pub async fn is_resolvable<R: Resolve + ?Sized>(domain: &str, resolver: &R) -> bool {
    let host = host_without_port(domain);

    if host.parse::<IpAddr>().is_ok() {
        debug!("{domain} is an IP literal, skipping DNS");
        return true;
    }

    if resolver.resolves_ipv4(host).await {
        debug!("{host} resolved over IPv4");
        return true;
    }

    if resolver.resolves_ipv6(host).await {
        debug!("{host} resolved over IPv6");
        return true;
    }

    debug!("{host} did not resolve over IPv4 or IPv6");
    false
}
