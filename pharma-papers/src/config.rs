//! Client configuration for the NCBI E-utilities endpoints
//!
//! All process-wide state (endpoint, credentials, rate limit) is carried by a
//! [`ClientConfig`] owned by the client instance, so tests can substitute the
//! transport by pointing `base_url` at a mock server.

use std::time::Duration;

use crate::rate_limit::RateLimiter;

/// Default NCBI E-utilities base URL
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Requests per second allowed without an API key
const DEFAULT_RATE_LIMIT: f64 = 3.0;

/// Requests per second allowed with an API key
const API_KEY_RATE_LIMIT: f64 = 10.0;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`PubMedClient`](crate::PubMedClient)
///
/// # Example
///
/// ```
/// use pharma_papers::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_api_key("your_api_key_here")
///     .with_email("researcher@example.com");
/// assert_eq!(config.effective_rate_limit(), 10.0);
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_key: Option<String>,
    email: Option<String>,
    tool: Option<String>,
    rate_limit: Option<f64>,
    base_url: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration with NCBI defaults (3 req/s, no API key)
    pub fn new() -> Self {
        Self {
            api_key: None,
            email: None,
            tool: None,
            rate_limit: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set an NCBI API key, raising the allowed request rate
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the contact email forwarded with every request
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the tool name forwarded with every request
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Override the request rate in requests per second
    pub fn with_rate_limit(mut self, requests_per_second: f64) -> Self {
        self.rate_limit = Some(requests_per_second);
        self
    }

    /// Override the E-utilities base URL (used by mocked tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Effective request rate: explicit override, else the NCBI ceiling for
    /// the credential state (10 req/s with a key, 3 without)
    pub fn effective_rate_limit(&self) -> f64 {
        match self.rate_limit {
            Some(rate) => rate,
            None if self.api_key.is_some() => API_KEY_RATE_LIMIT,
            None => DEFAULT_RATE_LIMIT,
        }
    }

    /// Effective base URL for the E-utilities endpoints
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// User agent sent with every request
    pub fn effective_user_agent(&self) -> String {
        format!("pharma-papers/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Query parameters appended to every request URL
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(api_key) = &self.api_key {
            params.push(("api_key".to_string(), api_key.clone()));
        }
        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }
        if let Some(tool) = &self.tool {
            params.push(("tool".to_string(), tool.clone()));
        }

        params
    }

    /// Build the rate limiter for this configuration
    pub fn create_rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.effective_rate_limit())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
