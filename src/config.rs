//! Client configuration
//!
//! [`ClientConfig`] is a builder-style bag of settings shared by every
//! request a [`PubMedClient`](crate::PubMedClient) makes.

use std::time::Duration;

use crate::pubmed::affiliation::AffiliationKeywords;

/// Default NCBI E-utilities endpoint
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Default cap on the number of PMIDs requested from ESearch
pub const DEFAULT_MAX_RESULTS: usize = 100;

const DEFAULT_TOOL: &str = "pubmed-pharma-papers";

/// Configuration for the PubMed client
///
/// # Example
///
/// ```
/// use pubmed_pharma_papers::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_email("researcher@example.com")
///     .with_tool("my-pipeline");
///
/// assert_eq!(config.effective_tool(), "my-pipeline");
/// assert_eq!(config.max_results, 100);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the E-utilities endpoints
    pub base_url: Option<String>,
    /// Contact email sent with each request
    pub email: Option<String>,
    /// Tool name sent with each request
    pub tool: Option<String>,
    /// Custom User-Agent header
    pub user_agent: Option<String>,
    /// Request timeout; `None` leaves the transport default in place
    pub timeout: Option<Duration>,
    /// `retmax` passed to ESearch
    pub max_results: usize,
    /// Keyword lists used to classify affiliations
    pub keywords: AffiliationKeywords,
}

impl ClientConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            base_url: None,
            email: None,
            tool: None,
            user_agent: None,
            timeout: None,
            max_results: DEFAULT_MAX_RESULTS,
            keywords: AffiliationKeywords::default(),
        }
    }

    /// Point the client at a different E-utilities host (used by mocked tests)
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the contact email reported to NCBI
    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the tool name reported to NCBI
    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Set a custom User-Agent header
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a request timeout in seconds
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout = Some(Duration::from_secs(seconds));
        self
    }

    /// Override the ESearch result cap
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Replace the affiliation keyword lists
    pub fn with_keywords(mut self, keywords: AffiliationKeywords) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("pubmed-pharma-papers/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn effective_tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(DEFAULT_TOOL)
    }

    /// Query parameters identifying the caller to NCBI
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("tool".to_string(), self.effective_tool().to_string())];

        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }

        params
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
