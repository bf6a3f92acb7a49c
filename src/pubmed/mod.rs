//! PubMed search, fetch and affiliation classification
//!
//! This module talks to the ESearch and EFetch E-utilities and turns their
//! responses into [`ArticleRecord`]s.

pub mod affiliation;
pub mod client;
pub mod models;
pub mod parser;
pub(crate) mod responses;

// Re-export public types
pub use affiliation::{ACADEMIC_KEYWORDS, AffiliationKeywords, PHARMA_KEYWORDS, extract_email};
pub use client::PubMedClient;
pub use models::{ArticleRecord, BatchExtraction, SkippedArticle};
pub use parser::extract_company_articles;
