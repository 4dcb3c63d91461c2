use super::CResult;
use reqwest::Url;

/// Parses `url` and accepts it only when it can be fetched over http(s).
pub fn valid_url_format(url: &str) -> CResult<Url> {
    let parsed = Url::parse(url)?;
    if is_web_url(&parsed) {
        Ok(parsed)
    } else {
        Err(url::ParseError::EmptyHost.into())
    }
}

pub fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
}

/// A fetched page: the url it came from and its raw body.
#[derive(Debug, Clone)]
pub struct UrlData(pub Url, pub String);

impl UrlData {
    pub fn get_url(&self) -> &Url {
        &self.0
    }
    pub fn get_raw_page(&self) -> &str {
        &self.1
    }
}
