use crate::Domain;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use std::collections::BTreeSet;

/// Lower-cased, sorted and unique addresses.
pub type EmailSet = BTreeSet<String>;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}")
        .expect("email pattern is valid")
});

/// Every substring of `text` shaped like an email address, as written.
pub fn find_emails(text: &str) -> impl Iterator<Item = &str> {
    EMAIL_RE.find_iter(text).map(|m| m.as_str())
}

/// Addresses in `text` that belong to `domain`, lower-cased.
pub fn extract_emails(text: &str, domain: &Domain) -> EmailSet {
    let suffix = format!("@{}", domain.as_str());
    find_emails(text)
        .map(str::to_lowercase)
        .filter(|email| email.ends_with(&suffix))
        .collect()
}

/// Same as [`extract_emails`] over several chunks of one page; chunks are scanned in parallel.
pub fn extract_from_chunks(chunks: &[String], domain: &Domain) -> EmailSet {
    chunks
        .par_iter()
        .flat_map_iter(|chunk| extract_emails(chunk, domain))
        .collect()
}
