use crate::{
    build_client, build_queries, extract_emails, extract_from_chunks, fetch_page, page_chunks,
    prepare_output_dir, resolve_target, save_results, valid_url_format, CResult, Config, Domain,
    EmailSet, HarvestError, SearchEngine,
};
use reqwest::{Client, Url};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const COMMON_PATHS: [&str; 14] = [
    "/contact",
    "/contact-us",
    "/about",
    "/about-us",
    "/support",
    "/help",
    "/info",
    "/team",
    "/staff",
    "/press",
    "/media",
    "/legal",
    "/privacy",
    "/careers",
];

/// Harvests every domain named by `config.target`, one after the other, and returns the
/// result files written.
///
/// Target and output directory problems abort the run before any request is sent. A domain
/// whose searches all fail, and whose own pages gave nothing, is reported and skipped.
pub async fn start_process(config: Config) -> CResult<Vec<PathBuf>> {
    let domains = resolve_target(config.get_target())?;
    prepare_output_dir(config.get_output_dir())?;
    let harvester = Harvester::new(&config)?;

    let mut written = vec![];
    for domain in &domains {
        info!("harvesting emails for {}", domain);
        match harvester.harvest(domain).await {
            Ok(emails) if emails.is_empty() => info!("no email addresses found for {}", domain),
            Ok(emails) => {
                print_emails(domain, &emails);
                written.push(save_results(&emails, domain, config.get_output_dir())?);
            }
            Err(e) => error!("skipping {}: {}", domain, e),
        }
    }
    Ok(written)
}

fn print_emails(domain: &Domain, emails: &EmailSet) {
    info!(
        "found {} unique email address(es) for {}",
        emails.len(),
        domain
    );
    for email in emails {
        println!("{email}");
    }
}

pub struct Harvester {
    client: Client,
    engine: SearchEngine,
    max_results: usize,
    delay: Duration,
    direct_scrape: bool,
    site_bases: Option<Vec<Url>>, // replaces https://<domain>/, http://<domain>/ when set
}

impl Harvester {
    pub fn new(config: &Config) -> CResult<Self> {
        let client = build_client(config.timeout)?;
        Ok(Self {
            engine: SearchEngine::new(client.clone(), &config.engine)?,
            client,
            max_results: config.max_results,
            delay: Duration::from_millis(config.delay_ms),
            direct_scrape: config.direct_scrape,
            site_bases: None,
        })
    }

    /// Probes the common pages under `bases`, in order, instead of the domain's own
    /// https and http roots.
    pub fn site_bases(mut self, bases: Vec<Url>) -> Self {
        self.site_bases = Some(bases);
        self
    }

    /// Runs the direct scrape (when enabled) and then every search query for `domain`.
    pub async fn harvest(&self, domain: &Domain) -> CResult<EmailSet> {
        let mut all_emails = EmailSet::new();
        if self.direct_scrape {
            all_emails.extend(self.scrape_common_pages(domain).await);
        }
        match self.search_phase(domain).await {
            Ok(found) => all_emails.extend(found),
            // the site itself already answered
            Err(e) if !all_emails.is_empty() => {
                warn!("{}, keeping {} addresses from the site", e, all_emails.len())
            }
            Err(e) => return Err(e),
        }
        Ok(all_emails)
    }

    async fn scrape_common_pages(&self, domain: &Domain) -> EmailSet {
        info!("scraping common pages on {}", domain);
        let bases = match &self.site_bases {
            Some(bases) => bases.clone(),
            None => site_roots(domain),
        };
        let mut all_emails = EmailSet::new();
        for candidates in common_page_urls(&bases) {
            for url in candidates {
                let found = scrape_page(&self.client, url.clone(), domain).await;
                if !found.is_empty() {
                    info!("found {} on {}", found.len(), url);
                    all_emails.extend(found);
                    // later bases are fallbacks only
                    break;
                }
            }
        }
        all_emails
    }

    async fn search_phase(&self, domain: &Domain) -> CResult<EmailSet> {
        let queries = build_queries(domain);
        let mut all_emails = EmailSet::new();
        let mut seen_urls: HashSet<Url> = HashSet::new();
        let mut failed = 0;

        for (i, query) in queries.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            info!("querying: {}", query);
            let hits = match self.engine.search(query, self.max_results).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!("search failed for {}: {}", query, e);
                    failed += 1;
                    continue;
                }
            };
            info!("{} results returned", hits.len());

            for hit in hits {
                let found = extract_emails(&hit.summary_text(), domain);
                if !found.is_empty() {
                    info!("found {} in snippet of {:?}", found.len(), hit.title);
                }
                all_emails.extend(found);

                if let Some(url) = hit.url {
                    if seen_urls.insert(url.clone()) {
                        let found = scrape_page(&self.client, url.clone(), domain).await;
                        if !found.is_empty() {
                            info!("found {} on {}", found.len(), url);
                        }
                        all_emails.extend(found);
                    }
                }
            }
        }

        if failed == queries.len() {
            return Err(HarvestError::SearchUnavailable(domain.to_string()));
        }
        Ok(all_emails)
    }
}

/// Fetches `url` and returns the addresses of `domain` found on it. A page that cannot be
/// fetched simply yields nothing.
pub async fn scrape_page(client: &Client, url: Url, domain: &Domain) -> EmailSet {
    match fetch_page(client, url).await {
        Ok(page) => {
            debug!("scanning {}", page.get_url());
            extract_from_chunks(&page_chunks(&page), domain)
        }
        Err(e) => {
            debug!("{}", e);
            EmailSet::new()
        }
    }
}

/// `https://<domain>/` then `http://<domain>/`.
pub fn site_roots(domain: &Domain) -> Vec<Url> {
    ["https", "http"]
        .iter()
        .filter_map(|scheme| valid_url_format(&format!("{scheme}://{domain}/")).ok())
        .collect()
}

/// Every common path joined onto each base, grouped per path in probing order.
pub fn common_page_urls(bases: &[Url]) -> Vec<Vec<Url>> {
    COMMON_PATHS
        .iter()
        .map(|path| bases.iter().filter_map(|base| base.join(path).ok()).collect())
        .collect()
}
