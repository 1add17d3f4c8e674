//! Page content fetcher backed by a reader endpoint that converts any URL
//! into prompt-ready markdown.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tracing::info;

use crate::config::Config;
use crate::error::AuditError;
use crate::pipeline::ContentFetcher;

/// Reader endpoint prefix: GET `<reader><url>` returns the page as markdown.
/// No API key required.
pub const DEFAULT_READER_URL: &str = "https://r.jina.ai/";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());
static BLANKS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Ensure the address carries a scheme; bare domains get https.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Remove markdown image syntax `![alt](url)` and collapse the blank runs
/// it leaves behind.
pub fn strip_images(md: &str) -> String {
    let cleaned = IMAGE_RE.replace_all(md, "");
    BLANKS_RE.replace_all(&cleaned, "\n\n").to_string()
}

pub struct PageFetcher {
    client: reqwest::Client,
    reader_url: String,
}

impl PageFetcher {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?,
            reader_url: config.reader_url.clone(),
        })
    }
}

#[async_trait]
impl ContentFetcher for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AuditError> {
        info!("Fetching page content: {}", url);

        let response = self
            .client
            .get(format!("{}{}", self.reader_url, url))
            .send()
            .await
            .map_err(|e| AuditError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| AuditError::Fetch(e.to_string()))?;

        let content = response
            .text()
            .await
            .map_err(|e| AuditError::Fetch(e.to_string()))?;

        info!("Fetched {} characters", content.chars().count());
        Ok(strip_images(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domain_gets_https() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("example.com/pricing"), "https://example.com/pricing");
    }

    #[test]
    fn existing_scheme_untouched() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_url("example.com");
        assert_eq!(normalize_url(&once), once);
    }

    #[test]
    fn images_are_stripped() {
        let md = "# Title\n\n![logo](https://cdn.test/logo.png)\n\n\n\nBody text";
        assert_eq!(strip_images(md), "# Title\n\nBody text");
    }

    #[test]
    fn plain_links_survive_stripping() {
        let md = "See [the docs](https://example.com/docs) for details";
        assert_eq!(strip_images(md), md);
    }
}
