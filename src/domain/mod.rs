//! Domain list loading and normalization.
//!
//! The list is plain text: `[category]` lines open a section, `#` starts a
//! comment, and every other non-blank line is a host or URL. Entries are
//! reduced to their root (registrable) domain using the Public Suffix List
//! and deduplicated in first-seen order.
//!
//! ```text
//! # Referenced from the API guides
//! [api]
//! https://api.example.com/v2/docs
//! - status.example.com
//!
//! [community]
//! forum.example.org   # moved in 2023
//! ```

use std::collections::HashSet;
use std::net::Ipv6Addr;
use std::path::Path;

use log::{debug, warn};
use tokio::io::AsyncReadExt;
use url::{Host, Url};

use crate::config::DEFAULT_CATEGORY;
use crate::error_handling::SourceError;

/// A domain entry with the section it was listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEntry {
    /// Lowercased section name
    pub category: String,
    /// Root domain, with `:port` when one was given
    pub domain: String,
}

/// Reads the domain list from `path` (or stdin for `-`) and returns the
/// unique root domains of the selected categories.
///
/// # Arguments
///
/// * `path` - Domain list file, or `-` for stdin
/// * `filters` - Category names to keep (case-insensitive); empty keeps all
///
/// # Errors
///
/// Returns `SourceError` if the list cannot be read. An empty result is not an error.
pub async fn load_domains(path: &Path, filters: &[String]) -> Result<Vec<String>, SourceError> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .map_err(SourceError::Stdin)?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SourceError::Read {
                path: path.to_path_buf(),
                source,
            })?
    };

    let domains = select_domains(&parse_domain_list(&contents), filters);
    debug!(
        "Loaded {} unique domain(s) from {}",
        domains.len(),
        path.display()
    );
    Ok(domains)
}

/// Parses the list into root-domain entries, keeping duplicates and order.
pub fn parse_domain_list(contents: &str) -> Vec<DomainEntry> {
    let mut category = DEFAULT_CATEGORY.to_string();
    let mut entries = Vec::new();

    for (lineno, raw) in contents.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = section_name(line) {
            category = name.to_lowercase();
            continue;
        }

        let entry = line.trim_start_matches(['-', '*']).trim();
        match root_domain(entry) {
            Some(domain) => entries.push(DomainEntry {
                category: category.clone(),
                domain,
            }),
            None => warn!("Skipping unparseable domain on line {}: {}", lineno + 1, entry),
        }
    }

    entries
}

/// Keeps entries whose category is in `filters` (all when empty) and drops
/// repeated domains.
pub fn select_domains(entries: &[DomainEntry], filters: &[String]) -> Vec<String> {
    let filters: HashSet<String> = filters.iter().map(|f| f.trim().to_lowercase()).collect();
    let mut seen = HashSet::new();

    entries
        .iter()
        .filter(|entry| filters.is_empty() || filters.contains(&entry.category))
        .filter(|entry| seen.insert(entry.domain.clone()))
        .map(|entry| entry.domain.clone())
        .collect()
}

/// Reduces a host or URL to its root domain.
///
/// IP addresses are kept as-is. A non-default port is preserved so local
/// test servers stay addressable.
///
/// # Examples
///
/// `https://docs.example.co.uk/guide` → `example.co.uk`,
/// `www.Example.com.` → `example.com`, `127.0.0.1:8080` → `127.0.0.1:8080`.
pub fn root_domain(entry: &str) -> Option<String> {
    let candidate = if entry.contains("://") {
        entry.to_string()
    } else {
        format!("http://{entry}")
    };
    let url = Url::parse(&candidate).ok()?;

    let root = match url.host()? {
        Host::Ipv4(ip) => ip.to_string(),
        Host::Ipv6(ip) => format!("[{ip}]"),
        Host::Domain(host) => {
            let host = host.trim_end_matches('.').to_lowercase();
            if host.is_empty() {
                return None;
            }
            psl::domain_str(&host).unwrap_or(host.as_str()).to_string()
        }
    };

    Some(match url.port() {
        Some(port) => format!("{root}:{port}"),
        None => root,
    })
}

/// The name in a `[category]` header line. A bracketed IPv6 literal such as
/// `[::1]` is an entry, not a header.
fn section_name(line: &str) -> Option<&str> {
    let name = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    if name.parse::<Ipv6Addr>().is_ok() {
        return None;
    }
    Some(name)
}

/// Drops a trailing `# comment`. A `#` inside a URL fragment is kept.
fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    match line.find(" #") {
        Some(idx) => &line[..idx],
        None => line,
    }
}
