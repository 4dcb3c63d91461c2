//! page parser for pulling the address-bearing text out of a fetched html page.
//!
//! Raw html already carries most addresses verbatim, but entity-encoded ones
//! (`info&#64;example.com`) only show up once the document is parsed, so the text nodes and
//! `mailto:` targets are collected as separate chunks.
use super::UrlData;
use once_cell::sync::Lazy;
use scraper::{node::Text, Html, Selector};
use std::collections::HashSet;

static FORBIDDEN: Lazy<HashSet<&str>> = Lazy::new(|| {
    HashSet::from([
        "script", "link", "meta", "base", "noscript", "template", "iframe", "object", "embed",
        "style",
    ])
});

static MAILTO: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href^="mailto:"]"#).expect("mailto selector is valid"));

/// only text holding an `@` can contain an address
fn is_good_text(text: &Text) -> bool {
    text.len() > 2 && text.contains('@')
}

/// returns the visible text nodes that may hold an address plus every mailto target
pub fn text_filter(urldata: &UrlData) -> Vec<String> {
    let document = Html::parse_document(urldata.get_raw_page());
    let mut full_text = vec![];

    for node in document.tree.nodes() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        // css or javascript, not page content
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| FORBIDDEN.contains(element.name()))
        });
        if !hidden && is_good_text(text) {
            full_text.push(text.trim().to_string());
        }
    }

    for link in document.select(&MAILTO) {
        if let Some(href) = link.value().attr("href") {
            let target = href.trim_start_matches("mailto:");
            let target = target.split('?').next().unwrap_or_default();
            if !target.is_empty() {
                full_text.push(target.to_string());
            }
        }
    }
    full_text
}

/// Every chunk worth scanning for one page: the raw body first, then the parsed text.
pub fn page_chunks(urldata: &UrlData) -> Vec<String> {
    let mut chunks = vec![urldata.get_raw_page().to_string()];
    chunks.extend(text_filter(urldata));
    chunks
}
