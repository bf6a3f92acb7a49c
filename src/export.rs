//! CSV export of [`ArticleRecord`]s
//!
//! Columns, in order: `PubmedID`, `Title`, `Publication Date`,
//! `Non-academic Author(s)`, `Company Affiliation(s)`,
//! `Corresponding Author Email`. List-valued fields are joined with `"; "`.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::pubmed::models::{ArticleRecord, LIST_SEPARATOR};

/// What [`write_table`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A file with a header and `rows` data rows was written
    Written { rows: usize },
    /// There were no records; no file was created
    NoData,
}

/// Flat CSV/console view of an [`ArticleRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRow {
    #[serde(rename = "PubmedID")]
    pub pmid: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Publication Date")]
    pub publication_date: String,
    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    pub email: String,
}

impl From<&ArticleRecord> for ArticleRow {
    fn from(record: &ArticleRecord) -> Self {
        Self {
            pmid: record.pmid.clone(),
            title: record.title.clone(),
            publication_date: record.publication_year.clone(),
            non_academic_authors: record.non_academic_authors_joined(),
            company_affiliations: record.company_affiliations_joined(),
            email: record.email.clone(),
        }
    }
}

impl From<ArticleRow> for ArticleRecord {
    fn from(row: ArticleRow) -> Self {
        Self {
            pmid: row.pmid,
            title: row.title,
            publication_year: row.publication_date,
            non_academic_authors: split_joined(&row.non_academic_authors),
            company_affiliations: split_joined(&row.company_affiliations),
            email: row.email,
        }
    }
}

/// Write records to a UTF-8 CSV file with a header row
///
/// Any existing file at `path` is overwritten. With no records, nothing is
/// written and [`WriteOutcome::NoData`] is returned.
///
/// # Example
///
/// ```no_run
/// use pubmed_pharma_papers::export::{write_table, WriteOutcome};
///
/// let outcome = write_table(&[], "papers.csv")?;
/// assert_eq!(outcome, WriteOutcome::NoData);
/// # Ok::<(), pubmed_pharma_papers::PubMedError>(())
/// ```
#[instrument(skip(records), fields(records = records.len(), path = %path.as_ref().display()))]
pub fn write_table<P: AsRef<Path>>(records: &[ArticleRecord], path: P) -> Result<WriteOutcome> {
    if records.is_empty() {
        warn!("No data to write");
        return Ok(WriteOutcome::NoData);
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path.as_ref())?;

    for record in records {
        writer.serialize(ArticleRow::from(record))?;
    }
    writer.flush()?;

    info!(rows = records.len(), "Wrote CSV file");
    Ok(WriteOutcome::Written {
        rows: records.len(),
    })
}

/// Read records back from a file produced by [`write_table`]
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Vec<ArticleRecord>> {
    let file = File::open(path.as_ref())?;
    let mut reader = csv::Reader::from_reader(file);

    reader
        .deserialize::<ArticleRow>()
        .map(|row| -> Result<ArticleRecord> { Ok(ArticleRecord::from(row?)) })
        .collect()
}

fn split_joined(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(LIST_SEPARATOR).map(str::to_string).collect()
}
