use std::result;

use thiserror::Error;

/// Fatal errors for client and export operations
///
/// Any of these aborts the run: an unreachable endpoint and a malformed
/// top-level payload are treated the same way.
#[derive(Error, Debug)]
pub enum PubMedError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// Generic API error with HTTP status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Response parsed but lacks the expected structure
    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },

    /// CSV serialization or deserialization failed
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// IO error for file operations
    #[error("IO error: {message}")]
    IoError { message: String },
}

pub type Result<T> = result::Result<T, PubMedError>;

impl From<std::io::Error> for PubMedError {
    fn from(err: std::io::Error) -> Self {
        PubMedError::IoError {
            message: err.to_string(),
        }
    }
}

/// Errors confined to a single article of an EFetch batch
///
/// These never escape the extractor: the article is logged and skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArticleParseError {
    /// A node the record cannot be built without is absent
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    /// The article fragment does not match the expected shape
    #[error("failed to decode article: {message}")]
    Decode { message: String },
}
