//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::InitializationError;

/// Initializes the client used for every probe.
///
/// Redirects are disabled so the classifier can follow them manually and
/// detect cycles. The whole request is bounded by `config.timeout_seconds`
/// and connection setup by `TCP_CONNECT_TIMEOUT_SECS`.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the TLS backend cannot
/// be initialized.
pub fn init_probe_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(
            TCP_CONNECT_TIMEOUT_SECS.min(config.timeout_seconds),
        ))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
