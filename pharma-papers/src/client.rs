//! Client for the NCBI E-utilities search and fetch endpoints
//!
//! The client owns every piece of process-wide state in the system: the
//! HTTP client, the configured endpoint, and the rate limiter clock. All
//! calls are sequential; the only suspension points are network I/O and the
//! rate-limit sleep. Failed calls are final — there is no retry layer.

use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{PapersError, Result};
use crate::models::Paper;
use crate::parser::parse_papers_from_xml;
use crate::rate_limit::RateLimiter;

/// ESearch serves at most the first 9,999 results of any query.
const MAX_RETRIEVABLE: usize = 9999;

#[derive(Debug, Deserialize)]
struct ESearchResult {
    esearchresult: ESearchData,
}

#[derive(Debug, Deserialize)]
struct ESearchData {
    #[serde(default, rename = "ERROR")]
    error: Option<String>,
    #[serde(default)]
    count: Option<String>,
    #[serde(default)]
    idlist: Vec<String>,
}

/// Client for searching and fetching PubMed records
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a client with default configuration (3 req/s, no API key)
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pharma_papers::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_api_key("your_api_key_here")
    ///     .with_email("researcher@example.com");
    /// let client = PubMedClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let rate_limiter = config.create_rate_limiter();
        let base_url = config.effective_base_url().to_string();

        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            rate_limiter,
            config,
        }
    }

    /// Search for records matching a query, returning their PMIDs
    ///
    /// # Errors
    ///
    /// * [`PapersError::SearchLimitExceeded`] - when `max_results` exceeds
    ///   the retrievable window
    /// * [`PapersError::RequestError`] - when the HTTP request fails
    /// * [`PapersError::ApiError`] - on a non-success status, or when a 200
    ///   body carries an ERROR field
    #[instrument(skip(self), fields(query = %query, max_results = max_results))]
    pub async fn search_ids(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        if max_results > MAX_RETRIEVABLE {
            return Err(PapersError::SearchLimitExceeded {
                requested: max_results,
                maximum: MAX_RETRIEVABLE,
            });
        }

        if query.trim().is_empty() {
            debug!("empty query, returning no ids");
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}&retmode=json",
            self.base_url,
            urlencoding::encode(query),
            max_results
        );

        debug!("issuing ESearch request");
        let response = self.make_request(&url).await?;
        let search_result: ESearchResult = response.json().await?;

        // NCBI sometimes reports failures in a 200 OK body.
        if let Some(message) = search_result.esearchresult.error {
            return Err(PapersError::ApiError {
                status: 200,
                message: format!("ESearch reported: {message}"),
            });
        }

        let total: usize = search_result
            .esearchresult
            .count
            .as_deref()
            .and_then(|count| count.parse().ok())
            .unwrap_or(0);
        let ids = search_result.esearchresult.idlist;

        if total > ids.len() {
            debug!(
                total,
                returned = ids.len(),
                "result set truncated to the requested cap"
            );
        }

        Ok(ids)
    }

    /// Fetch and parse the record for one PMID
    ///
    /// Returns `Ok(None)` when the response holds no parseable record for
    /// the id.
    #[instrument(skip(self), fields(pmid = %pmid))]
    pub async fn fetch_paper(&self, pmid: &str) -> Result<Option<Paper>> {
        let url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
            self.base_url,
            urlencoding::encode(pmid)
        );

        debug!("issuing EFetch request");
        let response = self.make_request(&url).await?;
        let xml = response.text().await?;

        if xml.trim().is_empty() {
            return Ok(None);
        }

        let papers = parse_papers_from_xml(&xml)?;
        Ok(papers.into_iter().find(|paper| paper.pmid() == pmid))
    }

    /// Run the full retrieval pipeline: search, then fetch each id in order
    ///
    /// Degrades instead of failing: a search error yields an empty result
    /// (indistinguishable from a query with no hits), and each failed or
    /// unparseable fetch is skipped. Every degradation leaves a warning in
    /// the log.
    pub async fn collect_papers(&self, query: &str, max_results: usize) -> Vec<Paper> {
        let ids = match self.search_ids(query, max_results).await {
            Ok(ids) => ids,
            Err(error) => {
                warn!(%error, "search failed, continuing with no results");
                return Vec::new();
            }
        };

        info!(count = ids.len(), "search returned ids");

        let mut papers = Vec::with_capacity(ids.len());
        for pmid in &ids {
            match self.fetch_paper(pmid).await {
                Ok(Some(paper)) => papers.push(paper),
                Ok(None) => warn!(%pmid, "no parseable record in fetch response, skipping"),
                Err(error) => warn!(%pmid, %error, "fetch failed, skipping"),
            }
        }

        info!(
            fetched = papers.len(),
            requested = ids.len(),
            "fetch pass complete"
        );
        papers
    }

    /// Rate-limited GET with the configured API parameters appended
    async fn make_request(&self, url: &str) -> Result<Response> {
        let mut final_url = url.to_string();
        let api_params = self.config.build_api_params();

        if !api_params.is_empty() {
            let separator = if url.contains('?') { '&' } else { '?' };
            final_url.push(separator);

            let params: Vec<String> = api_params
                .into_iter()
                .map(|(key, value)| format!("{key}={}", urlencoding::encode(&value)))
                .collect();
            final_url.push_str(&params.join("&"));
        }

        self.rate_limiter.acquire().await;
        debug!(url = %final_url, "sending request");
        let response = self.client.get(&final_url).send().await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "request failed");
            return Err(PapersError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            });
        }

        Ok(response)
    }
}

impl Default for PubMedClient {
    fn default() -> Self {
        Self::new()
    }
}
