//! PubMed EFetch XML parser
//!
//! Turns an EFetch payload into [`ArticleRecord`]s for articles with at least
//! one pharma/biotech affiliation.
//!
//! # Module Organization
//!
//! - `preprocessing` - strips inline formatting tags
//! - `fragments` - splits the payload into one fragment per article
//! - `xml_types` - lenient serde types for a single article
//! - `converters` - required-field checks and author classification
//!
//! A fragment that fails to decode or lacks a required node is logged and
//! skipped; only a payload that is not a `PubmedArticleSet` at all is fatal.

mod converters;
mod fragments;
mod preprocessing;
mod xml_types;

use std::sync::OnceLock;

use quick_xml::de::from_str;
use regex::Regex;
use tracing::{debug, info, instrument, warn};

use crate::error::{ArticleParseError, Result};
use crate::pubmed::affiliation::AffiliationKeywords;
use crate::pubmed::models::{BatchExtraction, SkippedArticle};
use xml_types::PubmedArticleXml;

#[cfg(doc)]
use crate::pubmed::models::ArticleRecord;

/// Extract company-affiliated articles from an EFetch XML response
///
/// # Errors
///
/// Returns [`PubMedError::XmlError`](crate::PubMedError::XmlError) when the
/// payload cannot be read as a `PubmedArticleSet`. Per-article problems are
/// reported in [`BatchExtraction::skipped`] instead.
///
/// # Example
///
/// ```
/// use pubmed_pharma_papers::AffiliationKeywords;
/// use pubmed_pharma_papers::pubmed::parser::extract_company_articles;
///
/// let xml = r#"<PubmedArticleSet>
///   <PubmedArticle>
///     <MedlineCitation>
///       <PMID>12345678</PMID>
///       <Article>
///         <Journal><JournalIssue><PubDate><Year>2023</Year></PubDate></JournalIssue></Journal>
///         <ArticleTitle>Example Article</ArticleTitle>
///         <AuthorList>
///           <Author>
///             <LastName>Doe</LastName>
///             <ForeName>Jane</ForeName>
///             <AffiliationInfo><Affiliation>Genentech, Inc.</Affiliation></AffiliationInfo>
///           </Author>
///         </AuthorList>
///       </Article>
///     </MedlineCitation>
///   </PubmedArticle>
/// </PubmedArticleSet>"#;
///
/// let batch = extract_company_articles(xml, &AffiliationKeywords::default())?;
/// assert_eq!(batch.records.len(), 1);
/// assert_eq!(batch.records[0].non_academic_authors, vec!["Jane Doe"]);
/// # Ok::<(), pubmed_pharma_papers::PubMedError>(())
/// ```
#[instrument(skip(xml, keywords), fields(xml_size = xml.len()))]
pub fn extract_company_articles(
    xml: &str,
    keywords: &AffiliationKeywords,
) -> Result<BatchExtraction> {
    let cleaned = preprocessing::strip_inline_html_tags(xml);
    let fragments = fragments::split_articles(&cleaned)?;
    debug!(articles = fragments.len(), "Split EFetch payload");

    let mut batch = BatchExtraction::default();

    for (position, fragment) in fragments.into_iter().enumerate() {
        let outcome = from_str::<PubmedArticleXml>(fragment)
            .map_err(|e| ArticleParseError::Decode {
                message: e.to_string(),
            })
            .and_then(|article| article.into_record(keywords));

        match outcome {
            Ok(record) => {
                batch.parsed += 1;
                if let Some(record) = record {
                    batch.records.push(record);
                }
            }
            Err(reason) => {
                let pmid = peek_pmid(fragment);
                warn!(
                    position,
                    pmid = pmid.as_deref().unwrap_or("unknown"),
                    error = %reason,
                    "Failed to parse article, skipping"
                );
                batch.skipped.push(SkippedArticle {
                    position,
                    pmid,
                    reason,
                });
            }
        }
    }

    info!(
        parsed = batch.parsed,
        qualifying = batch.records.len(),
        skipped = batch.skipped.len(),
        "Article extraction completed"
    );

    Ok(batch)
}

/// Best-effort PMID lookup on the raw fragment, for diagnostics only
fn peek_pmid(fragment: &str) -> Option<String> {
    static PMID_TAG: OnceLock<Regex> = OnceLock::new();
    let re = PMID_TAG.get_or_init(|| {
        Regex::new(r"<PMID[^>]*>\s*([^<\s]+)\s*</PMID>").expect("PMID pattern is valid")
    });
    re.captures(fragment).map(|c| c[1].to_string())
}
