use crate::item::SearchHit;
use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

/// Errors from talking to the catalog site.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed search response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl CatalogError {
    /// Short text suitable for the status line.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Http(e) if e.is_timeout() => "Request timed out".to_string(),
            CatalogError::Http(e) if e.is_connect() => "Could not reach the catalog site".to_string(),
            CatalogError::Http(e) => format!("Network error: {}", e),
            CatalogError::Status { status, .. } => format!("Server answered {}", status),
            CatalogError::Decode(_) => "Search returned data in an unexpected format".to_string(),
            CatalogError::InvalidUrl { url, .. } => format!("Not a valid address: {}", url),
        }
    }
}

/// HTTP access to the catalog site: whole pages and the search endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    search_path: String,
}

impl CatalogClient {
    pub fn new(
        base_url: &str,
        search_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("plant-explorer/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_http(builder.build()?, base_url, search_path)
    }

    pub(crate) fn with_http(http: reqwest::Client, base_url: &str, search_path: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            http,
            base_url: parse_url(base_url)?,
            search_path: search_path.to_string(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Search endpoint URL with the query as its `q` parameter.
    pub fn search_url(&self, query: &str) -> Result<Url, CatalogError> {
        let mut url = resolve(&self.base_url, None, &self.search_path)?;
        url.query_pairs_mut().clear().append_pair("q", query);
        Ok(url)
    }

    /// Fetch a document's HTML. Non-success statuses are errors.
    pub async fn fetch_page(&self, url: &Url) -> Result<String, CatalogError> {
        tracing::debug!(%url, "fetching page");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }

    /// Run a search. The body must be a JSON array of result objects.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, CatalogError> {
        let url = self.search_url(query)?;
        tracing::debug!(%url, "searching");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Join `href` onto the current page URL, or onto `base` before any page
/// has loaded.
pub fn resolve(base: &Url, current: Option<&Url>, href: &str) -> Result<Url, CatalogError> {
    current
        .unwrap_or(base)
        .join(href)
        .map_err(|e| CatalogError::InvalidUrl {
            url: href.to_string(),
            reason: e.to_string(),
        })
}

pub fn parse_url(raw: &str) -> Result<Url, CatalogError> {
    Url::parse(raw).map_err(|e| CatalogError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
