//! Organic search results via the SerpAPI Google engine.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::config::Config;
use crate::error::AuditError;
use crate::pipeline::SearchProvider;
use crate::records::SearchResult;

const SERPAPI_URL: &str = "https://serpapi.com/search";
const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

pub struct SerpApiClient {
    client: reqwest::Client,
    api_key: String,
}

impl SerpApiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(SEARCH_TIMEOUT).build()?,
            api_key: config.serpapi_key.clone(),
        })
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>, AuditError> {
        info!("Searching Google for '{}'", keyword);

        let num = limit.to_string();
        let response = self
            .client
            .get(SERPAPI_URL)
            .query(&[
                ("engine", "google"),
                ("q", keyword),
                ("num", num.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuditError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| AuditError::Fetch(e.to_string()))?;

        let data: SerpApiResponse = response
            .json()
            .await
            .map_err(|e| AuditError::Fetch(e.to_string()))?;

        let results: Vec<SearchResult> = data
            .organic_results
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, r)| SearchResult {
                rank: i + 1,
                title: r.title,
                url: r.link,
                snippet: r.snippet,
            })
            .collect();

        info!("Found {} organic results", results.len());
        Ok(results)
    }
}
