//! Projection from the lenient XML types to [`ArticleRecord`]

use super::xml_types::{AuthorXml, PubmedArticleXml};
use crate::error::ArticleParseError;
use crate::pubmed::affiliation::{AffiliationKeywords, extract_email};
use crate::pubmed::models::{ArticleRecord, Author, UNKNOWN_YEAR};

type ConvertResult<T> = std::result::Result<T, ArticleParseError>;

fn missing(field: &'static str) -> ArticleParseError {
    ArticleParseError::MissingField { field }
}

impl PubmedArticleXml {
    /// PMID if present and non-blank
    pub(super) fn pmid(&self) -> Option<String> {
        self.medline_citation
            .as_ref()?
            .pmid
            .as_ref()
            .map(|p| p.value.trim().to_string())
            .filter(|p| !p.is_empty())
    }

    /// Validate the article and classify its authors
    ///
    /// Returns `Ok(None)` for a well-formed article without any company
    /// affiliation.
    pub(super) fn into_record(
        self,
        keywords: &AffiliationKeywords,
    ) -> ConvertResult<Option<ArticleRecord>> {
        let pmid = self.pmid().ok_or_else(|| missing("MedlineCitation/PMID"))?;

        let article = self
            .medline_citation
            .and_then(|m| m.article)
            .ok_or_else(|| missing("MedlineCitation/Article"))?;

        let title = article
            .article_title
            .ok_or_else(|| missing("Article/ArticleTitle"))?;

        let pub_date = article
            .journal
            .ok_or_else(|| missing("Article/Journal"))?
            .journal_issue
            .ok_or_else(|| missing("Journal/JournalIssue"))?
            .pub_date
            .ok_or_else(|| missing("JournalIssue/PubDate"))?;

        let publication_year = pub_date
            .year
            .map(|y| y.trim().to_string())
            .filter(|y| !y.is_empty())
            .unwrap_or_else(|| UNKNOWN_YEAR.to_string());

        let authors = article
            .author_list
            .map(|list| list.authors)
            .unwrap_or_default()
            .into_iter()
            .map(AuthorXml::into_author)
            .collect::<ConvertResult<Vec<_>>>()?;

        let classified = classify_authors(&authors, keywords);
        if classified.company_affiliations.is_empty() {
            return Ok(None);
        }

        Ok(Some(ArticleRecord {
            pmid,
            title: title.trim().to_string(),
            publication_year,
            non_academic_authors: classified.non_academic_authors,
            company_affiliations: classified.company_affiliations,
            email: classified.email,
        }))
    }
}

impl AuthorXml {
    fn into_author(self) -> ConvertResult<Author> {
        // Only the first AffiliationInfo is ever read, so only it must be complete
        if self
            .affiliation_info
            .first()
            .is_some_and(|info| info.affiliation.is_none())
        {
            return Err(missing("AffiliationInfo/Affiliation"));
        }

        Ok(Author {
            fore_name: self.fore_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            affiliations: self
                .affiliation_info
                .into_iter()
                .filter_map(|info| info.affiliation)
                .collect(),
        })
    }
}

#[derive(Debug, Default)]
struct AuthorClassification {
    non_academic_authors: Vec<String>,
    company_affiliations: Vec<String>,
    email: String,
}

/// Classify each author by their first affiliation; the last email seen wins
fn classify_authors(authors: &[Author], keywords: &AffiliationKeywords) -> AuthorClassification {
    let mut out = AuthorClassification::default();

    for author in authors {
        let Some(affiliation) = author.first_affiliation() else {
            continue;
        };

        if keywords.is_pharma_affiliation(affiliation) {
            out.company_affiliations.push(affiliation.to_string());
        }
        if keywords.is_non_academic_affiliation(affiliation) {
            out.non_academic_authors.push(author.full_name());
        }
        if let Some(email) = extract_email(affiliation) {
            out.email = email;
        }
    }

    out
}
