use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::pubmed::models::{ArticleRecord, BatchExtraction};
use crate::pubmed::parser::extract_company_articles;
use crate::pubmed::responses::ESearchResult;

/// Client for the ESearch and EFetch endpoints
///
/// Requests are issued one at a time; nothing is retried or cached.
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a new PubMed client with default configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_pharma_papers::PubMedClient;
    ///
    /// let client = PubMedClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a new PubMed client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_pharma_papers::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_email("researcher@example.com")
    ///     .with_max_results(50);
    ///
    /// let client = PubMedClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let mut builder = Client::builder().user_agent(config.effective_user_agent());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self::with_client_and_config(client, config)
    }

    /// Create a new PubMed client around an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self::with_client_and_config(client, ClientConfig::new())
    }

    fn with_client_and_config(client: Client, config: ClientConfig) -> Self {
        let base_url = config.effective_base_url().to_string();
        Self {
            client,
            base_url,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Search PubMed and return up to `max_results` PMIDs in server order
    ///
    /// An empty query returns no PMIDs without touching the network.
    ///
    /// # Errors
    ///
    /// * `PubMedError::RequestError` - If the HTTP request fails
    /// * `PubMedError::ApiError` - On a non-success status or an ESearch `ERROR` field
    /// * `PubMedError::JsonError` - If the body is not ESearch JSON
    /// * `PubMedError::UnexpectedResponse` - If the body has no `idlist`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_pharma_papers::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let pmids = client.fetch_ids("cancer immunotherapy").await?;
    ///     println!("Found {} articles", pmids.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(query = %query))]
    pub async fn fetch_ids(&self, query: &str) -> Result<Vec<String>> {
        if query.trim().is_empty() {
            debug!("Empty query provided, returning empty results");
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmode=json&retmax={}",
            self.base_url,
            urlencoding::encode(query),
            self.config.max_results
        );

        debug!("Making ESearch API request");
        let response = self.make_request(&url).await?;
        let search_result: ESearchResult = serde_json::from_str(&response.text().await?)?;

        // NCBI reports query errors with 200 OK and an ERROR field
        if let Some(error_msg) = search_result.esearchresult.error {
            return Err(PubMedError::ApiError {
                status: 200,
                message: format!("NCBI ESearch API error: {}", error_msg),
            });
        }

        let pmids = search_result
            .esearchresult
            .idlist
            .ok_or_else(|| PubMedError::UnexpectedResponse {
                message: "ESearch response has no esearchresult.idlist".to_string(),
            })?;

        info!(
            results_found = pmids.len(),
            total_count = search_result.esearchresult.count.as_deref().unwrap_or("?"),
            "Search completed successfully"
        );

        Ok(pmids)
    }

    /// Fetch the given PMIDs in one EFetch request and keep only articles
    /// with a company affiliation
    ///
    /// Articles that fail to parse are logged and skipped.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_pharma_papers::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let records = client.fetch_details(&["31978945", "33515491"]).await?;
    ///     for record in &records {
    ///         println!("{}: {}", record.pmid, record.company_affiliations_joined());
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn fetch_details<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<ArticleRecord>> {
        Ok(self.fetch_batch(ids).await?.records)
    }

    /// Like [`fetch_details`](Self::fetch_details) but also reports the
    /// skipped articles
    #[instrument(skip(self, ids), fields(ids_count = ids.len()))]
    pub async fn fetch_batch<S: AsRef<str>>(&self, ids: &[S]) -> Result<BatchExtraction> {
        if ids.is_empty() {
            debug!("No PMIDs to fetch");
            return Ok(BatchExtraction::default());
        }

        let id_list = ids
            .iter()
            .map(|id| urlencoding::encode(id.as_ref().trim()).into_owned())
            .collect::<Vec<_>>()
            .join(",");

        let url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
            self.base_url, id_list
        );

        debug!("Making EFetch API request");
        let response = self.make_request(&url).await?;
        let xml_text = response.text().await?;

        let batch = extract_company_articles(&xml_text, &self.config.keywords)?;
        if !batch.skipped.is_empty() {
            warn!(
                skipped = batch.skipped.len(),
                "Some articles could not be parsed"
            );
        }

        Ok(batch)
    }

    /// Search, then fetch and classify every PMID found
    pub async fn search_and_extract(&self, query: &str) -> Result<Vec<ArticleRecord>> {
        let pmids = self.fetch_ids(query).await?;
        self.fetch_details(&pmids).await
    }

    /// Issue a GET with the NCBI identification parameters appended
    async fn make_request(&self, url: &str) -> Result<Response> {
        let mut final_url = url.to_string();
        let api_params = self.config.build_api_params();

        if !api_params.is_empty() {
            let separator = if url.contains('?') { '&' } else { '?' };
            final_url.push(separator);

            let param_strings: Vec<String> = api_params
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
                .collect();
            final_url.push_str(&param_strings.join("&"));
        }

        debug!("Making API request to: {}", final_url);
        let response = self.client.get(&final_url).send().await?;

        if !response.status().is_success() {
            warn!("API request failed with status: {}", response.status());
            return Err(PubMedError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
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
