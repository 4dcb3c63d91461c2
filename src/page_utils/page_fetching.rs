use super::{CResult, UrlData};
use crate::HarvestError;
use reqwest::{Client, Url};
use tokio::time::Duration;
use tracing::debug;

pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// One client per run, every request goes through it.
pub fn build_client(timeout_secs: u64) -> CResult<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(4)
        .build()?;
    Ok(client)
}

/// GETs `url` and returns its body; anything but a 2xx answer is an error.
pub async fn fetch_page(client: &Client, url: Url) -> CResult<UrlData> {
    debug!("fetching {}", url);
    let response = client.get(url.as_str()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::Status {
            url: url.to_string(),
            status,
        });
    }
    let body = response.text().await?;
    Ok(UrlData(url, body))
}
