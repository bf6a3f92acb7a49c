//! # PubMed Pharma Papers
//!
//! Find PubMed articles with at least one author affiliated with a
//! pharmaceutical or biotech company, and export them as CSV.
//!
//! ## Features
//!
//! - **ESearch / EFetch**: one search call, one batch fetch call
//! - **Affiliation heuristics**: keyword classification of company and
//!   non-academic affiliations
//! - **Fail-soft parsing**: a malformed article is logged and skipped, the
//!   rest of the batch is kept
//! - **CSV export**: header row plus one row per qualifying article
//!
//! ## Quick Start
//!
//! ```no_run
//! use pubmed_pharma_papers::{PubMedClient, export};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubMedClient::new();
//!
//!     let pmids = client.fetch_ids("crispr therapeutics").await?;
//!     let records = client.fetch_details(&pmids).await?;
//!
//!     for record in &records {
//!         println!("{}: {}", record.pmid, record.company_affiliations_joined());
//!     }
//!
//!     export::write_table(&records, "papers.csv")?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod pubmed;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use error::{ArticleParseError, PubMedError, Result};
pub use export::{WriteOutcome, read_table, write_table};
pub use pubmed::{AffiliationKeywords, ArticleRecord, BatchExtraction, PubMedClient, SkippedArticle};
