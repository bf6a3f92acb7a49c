use serde::{Deserialize, Serialize};

use crate::error::ArticleParseError;

/// Literal used when an article has no publication year
pub const UNKNOWN_YEAR: &str = "Unknown";

/// Separator for multi-valued fields in tabular output
pub const LIST_SEPARATOR: &str = "; ";

/// An article with at least one pharma/biotech affiliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// PubMed ID
    pub pmid: String,
    /// Article title
    pub title: String,
    /// Publication year, or `"Unknown"`
    pub publication_year: String,
    /// Names of authors whose first affiliation has no academic keyword
    pub non_academic_authors: Vec<String>,
    /// Affiliation texts classified as pharma/biotech, in author order
    pub company_affiliations: Vec<String>,
    /// Best-effort contact email, empty when none was found
    pub email: String,
}

impl ArticleRecord {
    pub fn non_academic_authors_joined(&self) -> String {
        self.non_academic_authors.join(LIST_SEPARATOR)
    }

    pub fn company_affiliations_joined(&self) -> String {
        self.company_affiliations.join(LIST_SEPARATOR)
    }

    /// Render as a single-line JSON object keyed like the CSV header
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(&crate::export::ArticleRow::from(self))
    }
}

/// Author as seen while extracting one article
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Author {
    pub fore_name: String,
    pub last_name: String,
    pub affiliations: Vec<String>,
}

impl Author {
    /// `"{fore_name} {last_name}"`, trimmed
    pub fn full_name(&self) -> String {
        format!("{} {}", self.fore_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn first_affiliation(&self) -> Option<&str> {
        self.affiliations.first().map(String::as_str)
    }
}

/// An article dropped from a batch because it could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedArticle {
    /// Zero-based position of the article in the EFetch payload
    pub position: usize,
    /// PMID, when it could be read
    pub pmid: Option<String>,
    pub reason: ArticleParseError,
}

/// Outcome of extracting one EFetch payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchExtraction {
    /// Qualifying records, in payload order
    pub records: Vec<ArticleRecord>,
    /// Articles that failed to parse
    pub skipped: Vec<SkippedArticle>,
    /// Number of articles that parsed, qualifying or not
    pub parsed: usize,
}
