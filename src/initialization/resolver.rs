//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS};

/// Initializes the resolver used for A/AAAA existence checks.
///
/// Uses the default upstream configuration with short timeouts so a dead
/// nameserver cannot stall the run. `ndots` is 0 so names are never
/// expanded with local search domains.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = DNS_ATTEMPTS;
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}
