//! Site-scoped queries against a search engine's html interface.
//!
//! The default endpoint is DuckDuckGo's javascript-free frontend, which answers a
//! `GET ?q=<query>` with one `.result` block per hit. Any endpoint serving the same markup
//! works, which is what the tests rely on.
use crate::{fetch_page, CResult, Domain};
use once_cell::sync::Lazy;
use reqwest::{Client, Url};
use scraper::{ElementRef, Html, Selector};

pub const DEFAULT_ENGINE: &str = "https://html.duckduckgo.com/html/";

static RESULT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".result:not(.result--ad)").expect("result selector is valid"));
static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.result__a").expect("title selector is valid"));
static SNIPPET: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".result__snippet").expect("snippet selector is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub url: Option<Url>, // target page, already unwrapped from the engine's redirect
}

impl SearchHit {
    /// title and snippet joined, the text shown on the result page
    pub fn summary_text(&self) -> String {
        format!("{} {}", self.title, self.snippet)
    }
}

pub fn build_queries(domain: &Domain) -> Vec<String> {
    vec![
        format!("\"@{domain}\""),
        format!("site:{domain} email"),
        format!("\"{domain}\" email contact"),
        format!("intext:\"@{domain}\""),
    ]
}

pub struct SearchEngine {
    client: Client,
    endpoint: Url,
}

impl SearchEngine {
    pub fn new(client: Client, endpoint: &str) -> CResult<Self> {
        Ok(Self {
            client,
            endpoint: Url::parse(endpoint)?,
        })
    }
    /// Runs one query and keeps at most `max_results` hits.
    pub async fn search(&self, query: &str, max_results: usize) -> CResult<Vec<SearchHit>> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("q", query);
        let page = fetch_page(&self.client, url).await?;
        Ok(parse_results(page.get_raw_page(), &self.endpoint, max_results))
    }
}

pub fn parse_results(html: &str, base: &Url, max_results: usize) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    document
        .select(&RESULT)
        .filter_map(|result| {
            let title = result.select(&TITLE).next()?;
            let url = title
                .value()
                .attr("href")
                .and_then(|href| resolve_result_link(href, base));
            let snippet = result
                .select(&SNIPPET)
                .next()
                .map(collapsed_text)
                .unwrap_or_default();
            Some(SearchHit {
                title: collapsed_text(title),
                snippet,
                url,
            })
        })
        .take(max_results)
        .collect()
}

/// Resolves a result href against the endpoint and unwraps `/l/?uddg=<target>` redirects.
/// Only http(s) targets survive.
pub fn resolve_result_link(href: &str, base: &Url) -> Option<Url> {
    let joined = base.join(href.trim()).ok()?;
    let target = joined
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .and_then(|(_, value)| Url::parse(&value).ok())
        .unwrap_or(joined);
    crate::is_web_url(&target).then_some(target)
}

// engines bold the matched terms, so the text nodes are joined before collapsing whitespace
fn collapsed_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
