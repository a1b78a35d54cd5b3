//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_DOMAINS_FILE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, MAX_REDIRECTS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Per-domain lines while checking, then a summary block
    Text,
    /// One JSON array of results at the end of the run
    Json,
}

/// When the process should exit non-zero because of domain results.
///
/// A failed run (unreadable domain list, client setup failure) always exits 1;
/// this only governs runs that completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Always exit 0 once the run completes (report-only mode)
    Never,
    /// Exit 2 if any domain is not `VALID`
    AnyProblem,
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Check every domain in ./domains.txt
/// domain_audit
///
/// # Only the "api" and "docs" sections, failing the CI job on any problem
/// domain_audit api docs --fail-on any-problem
///
/// # Read the list from stdin
/// cat domains.txt | domain_audit --domains -
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "domain_audit",
    about = "Checks referenced domains for DNS, HTTP reachability, parked pages and WAF blocks."
)]
pub struct Opt {
    /// Categories to check (section names in the domain list); all when omitted
    #[arg(value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Domain list file, or `-` for stdin
    #[arg(long, value_parser, default_value = DEFAULT_DOMAINS_FILE)]
    pub domains: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_seconds: u64,

    /// Maximum requests per redirect chain before reporting REDIRECT_LOOP
    #[arg(
        long,
        default_value_t = MAX_REDIRECTS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_redirects: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Exit code policy: never|any-problem
    #[arg(long, value_enum, default_value_t = FailOn::Never)]
    pub fail_on: FailOn,

    /// Report format: text|json
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Probe plain HTTP only (skip the HTTPS attempt)
    #[arg(long)]
    pub http_only: bool,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use domain_audit::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     domains: PathBuf::from("docs/domains.txt"),
///     categories: vec!["api".to_string()],
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Domain list file (`-` for stdin)
    pub domains: PathBuf,

    /// Category filters; empty means all categories
    pub categories: Vec<String>,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Request bound per redirect chain (one chain per protocol attempt)
    pub max_redirects: usize,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Exit code policy
    pub fail_on: FailOn,

    /// Report format
    pub format: ReportFormat,

    /// Skip the HTTPS attempt
    pub http_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domains: PathBuf::from(DEFAULT_DOMAINS_FILE),
            categories: Vec::new(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_redirects: MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fail_on: FailOn::Never,
            format: ReportFormat::Text,
            http_only: false,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            domains: opt.domains,
            categories: opt.categories,
            log_level: opt.log_level,
            log_format: opt.log_format,
            timeout_seconds: opt.timeout_seconds,
            max_redirects: opt.max_redirects,
            user_agent: opt.user_agent,
            fail_on: opt.fail_on,
            format: opt.format,
            http_only: opt.http_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.domains, PathBuf::from("domains.txt"));
        assert!(config.categories.is_empty());
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.max_redirects, 5);
        assert_eq!(config.fail_on, FailOn::Never);
        assert_eq!(config.format, ReportFormat::Text);
        assert!(!config.http_only);
    }

    #[test]
    fn test_opt_defaults_match_config_defaults() {
        let opt = Opt::try_parse_from(["domain_audit"]).expect("Should parse without arguments");
        let config = Config::from(opt);
        let default = Config::default();

        assert_eq!(config.domains, default.domains);
        assert_eq!(config.timeout_seconds, default.timeout_seconds);
        assert_eq!(config.max_redirects, default.max_redirects);
        assert_eq!(config.user_agent, default.user_agent);
        assert_eq!(config.fail_on, default.fail_on);
        assert_eq!(
            log::LevelFilter::from(config.log_level),
            log::LevelFilter::from(default.log_level)
        );
    }

    #[test]
    fn test_opt_positional_categories() {
        let opt = Opt::try_parse_from(["domain_audit", "api", "docs"]).expect("Should parse");
        assert_eq!(opt.categories, vec!["api".to_string(), "docs".to_string()]);
    }

    #[test]
    fn test_opt_fail_on_any_problem() {
        let opt = Opt::try_parse_from(["domain_audit", "--fail-on", "any-problem"])
            .expect("Should parse --fail-on");
        assert_eq!(opt.fail_on, FailOn::AnyProblem);
    }

    #[test]
    fn test_opt_rejects_zero_max_redirects() {
        assert!(Opt::try_parse_from(["domain_audit", "--max-redirects", "0"]).is_err());
        let opt = Opt::try_parse_from(["domain_audit", "--max-redirects", "1"]).expect("Should parse");
        assert_eq!(opt.max_redirects, 1);
    }

    #[test]
    fn test_opt_rejects_unknown_fail_on() {
        let result = Opt::try_parse_from(["domain_audit", "--fail-on", "sometimes"]);
        assert!(result.is_err());
    }
}
