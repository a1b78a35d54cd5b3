//! HTTP probing.
//!
//! This module provides:
//! - `ProbeOutcome`, the result of one fetch (network failure or response)
//! - The `Fetch` seam and its reqwest-backed implementation
//! - Manual redirect following with cycle and hop-count bounds

mod outcome;
mod redirects;
mod request;

// Re-export public API
pub use outcome::{HttpResponse, NetworkFailure, ProbeOutcome};
pub use redirects::{follow_redirects, RedirectOutcome};
pub use request::{Fetch, HttpFetcher};
