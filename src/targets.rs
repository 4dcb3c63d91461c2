//! Turns the positional `target` argument into the list of domains to harvest.
use crate::{CResult, HarvestError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use url::Url;

static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)+$")
        .expect("domain pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Domain(String);

impl Domain {
    /// Normalizes `raw` (trims, drops a leading `@` or `www.`, reduces urls to their host)
    /// and validates the result.
    pub fn parse(raw: &str) -> CResult<Self> {
        let normalized = normalize_domain(raw);
        if DOMAIN_RE.is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(HarvestError::InvalidDomain(raw.trim().to_string()))
        }
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn normalize_domain(raw: &str) -> String {
    let trimmed = raw.trim().trim_start_matches('@');
    let mut domain = if trimmed.contains("://") {
        Url::parse(trimmed)
            .ok()
            .and_then(|u| u.host_str().map(str::to_owned))
            .unwrap_or_else(|| trimmed.to_owned())
    } else {
        trimmed.to_owned()
    };
    domain = domain.trim_end_matches('.').to_lowercase();
    match domain.strip_prefix("www.") {
        Some(rest) => rest.to_owned(),
        None => domain,
    }
}

/// Resolves the target argument.
///
/// An existing file is read as a list, one domain per line (blank lines and `#` comments
/// are ignored, invalid lines are skipped with a warning, duplicates dropped). A missing
/// path that looks like a file name is an error, anything else is a single domain.
pub fn resolve_target(target: &str) -> CResult<Vec<Domain>> {
    let path = Path::new(target);
    if path.is_file() {
        let content = fs::read_to_string(path).map_err(|source| HarvestError::TargetUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let domains = parse_domain_list(&content);
        if domains.is_empty() {
            return Err(HarvestError::EmptyTargetList(path.to_path_buf()));
        }
        info!("loaded {} domains from {}", domains.len(), path.display());
        return Ok(domains);
    }
    if looks_like_path(target) {
        return Err(HarvestError::TargetNotFound(path.to_path_buf()));
    }
    Ok(vec![Domain::parse(target)?])
}

pub fn parse_domain_list(content: &str) -> Vec<Domain> {
    let mut domains: Vec<Domain> = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match Domain::parse(line) {
            Ok(domain) if !domains.contains(&domain) => domains.push(domain),
            Ok(_) => {}
            Err(e) => warn!("skipping line {}: {}", line_num + 1, e),
        }
    }
    domains
}

fn looks_like_path(target: &str) -> bool {
    if target.contains("://") {
        return false;
    }
    target.contains(std::path::MAIN_SEPARATOR) || target.contains('/') || target.ends_with(".txt")
}
