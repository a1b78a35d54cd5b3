//! domain_audit library: classify the domains a project links to
//!
//! Each domain gets a DNS existence check followed by an HTTPS (then HTTP)
//! probe with manual redirect following. The final response is classified
//! by status code and page content into a `DomainStatus`: valid, parked,
//! WAF-protected, expired, redirect loop and so on.
//!
//! # Example
//!
//! ```no_run
//! use domain_audit::{run_audit, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domains: PathBuf::from("docs/domains.txt"),
//!     categories: vec!["api".to_string()],
//!     ..Default::default()
//! };
//!
//! let report = run_audit(config).await?;
//! println!(
//!     "Checked {} domains: {} problematic",
//!     report.total(),
//!     report.problematic().len()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
mod classify;
pub mod config;
mod dns;
mod domain;
mod error_handling;
mod fetch;
pub mod initialization;
mod status;
#[cfg(test)]
mod test_helpers;

// Re-export public API
pub use app::{evaluate_exit_code, format_result_line, render_json, render_summary};
pub use classify::{
    classify_content, classify_response, extract_page_text, ContentPatterns, DomainClassifier,
    PageText, Scheme, DEFAULT_SCHEMES,
};
pub use config::{Config, FailOn, LogFormat, LogLevel, Opt, ReportFormat};
pub use dns::{is_resolvable, Resolve};
pub use domain::{load_domains, parse_domain_list, root_domain, select_domains, DomainEntry};
pub use error_handling::{InitializationError, SourceError};
pub use fetch::{
    follow_redirects, Fetch, HttpFetcher, HttpResponse, NetworkFailure, ProbeOutcome,
    RedirectOutcome,
};
pub use run::{run_audit, AuditReport};
pub use status::{DomainResult, DomainStatus};

// Internal run module (drives one audit from domain list to report)
mod run {
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::info;

    use crate::app::{count_by_status, format_result_line};
    use crate::classify::{DomainClassifier, Scheme};
    use crate::config::{Config, ReportFormat};
    use crate::domain::load_domains;
    use crate::fetch::HttpFetcher;
    use crate::initialization::{init_probe_client, init_resolver};
    use crate::status::{DomainResult, DomainStatus};

    /// Results of one audit run.
    #[derive(Debug, Clone)]
    pub struct AuditReport {
        /// One result per domain, in input order
        pub results: Vec<DomainResult>,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    impl AuditReport {
        /// Number of domains checked.
        pub fn total(&self) -> usize {
            self.results.len()
        }

        /// Results whose status is anything but `VALID`.
        pub fn problematic(&self) -> Vec<&DomainResult> {
            self.results.iter().filter(|r| !r.accessible()).collect()
        }

        /// Non-zero counts per status, in `DomainStatus` declaration order.
        pub fn counts(&self) -> Vec<(DomainStatus, usize)> {
            count_by_status(&self.results)
        }
    }

    /// Runs an audit with the provided configuration.
    ///
    /// Loads and filters the domain list, then classifies each domain in
    /// turn. With `ReportFormat::Text` a line is printed to stdout as each
    /// domain finishes. Non-`VALID` domains do not make this fail; see
    /// `evaluate_exit_code` for the CI policy.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The domain list cannot be read
    /// - The HTTP client cannot be built
    pub async fn run_audit(config: Config) -> Result<AuditReport> {
        let start_time = Instant::now();

        let domains = load_domains(&config.domains, &config.categories)
            .await
            .context("Failed to load domain list")?;
        info!(
            "Checking {} domain(s) from {}",
            domains.len(),
            config.domains.display()
        );

        let client = init_probe_client(&config).context("Failed to initialize HTTP client")?;
        let resolver = init_resolver();

        let mut classifier = DomainClassifier::new(resolver, HttpFetcher::new(client))
            .with_max_redirects(config.max_redirects);
        if config.http_only {
            classifier = classifier.with_schemes(vec![Scheme::Http]);
        }

        let mut results = Vec::with_capacity(domains.len());
        for domain in &domains {
            let result = classifier.classify(domain).await;
            if config.format == ReportFormat::Text {
                println!("{}", format_result_line(&result));
            }
            results.push(result);
        }

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        info!(
            "Checked {} domain(s) in {:.1}s",
            results.len(),
            elapsed_seconds
        );

        Ok(AuditReport {
            results,
            elapsed_seconds,
        })
    }
}
