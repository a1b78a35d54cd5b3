//! Shared resource setup.
//!
//! Builds the collaborators a run needs before any domain is checked:
//! - Logger
//! - HTTP probe client (redirects disabled, bounded timeouts)
//! - DNS resolver

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_probe_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;
