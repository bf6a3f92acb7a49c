//! Affiliation classification
//!
//! Keyword heuristics deciding whether an affiliation string belongs to a
//! pharmaceutical/biotech company and whether it is non-academic. Matching is
//! a case-insensitive substring test, so `"inc"` also matches `"Lincoln"`.

/// Substrings marking an affiliation as industry-related
pub const PHARMA_KEYWORDS: &[&str] = &["pharma", "biotech", "therapeutics", "inc", "llc"];

/// Substrings marking an affiliation as academic
pub const ACADEMIC_KEYWORDS: &[&str] = &["university", "college", "institute", "school"];

/// Keyword lists used to classify affiliation text
///
/// Keywords are lowercased on construction.
///
/// # Example
///
/// ```
/// use pubmed_pharma_papers::AffiliationKeywords;
///
/// let keywords = AffiliationKeywords::default();
/// assert!(keywords.is_pharma_affiliation("Genentech, Inc."));
/// assert!(!keywords.is_non_academic_affiliation("Harvard Medical School"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliationKeywords {
    pharma: Vec<String>,
    academic: Vec<String>,
}

impl AffiliationKeywords {
    pub fn new<P, A>(pharma: P, academic: A) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self {
            pharma: lowercase_all(pharma),
            academic: lowercase_all(academic),
        }
    }

    pub fn pharma(&self) -> &[String] {
        &self.pharma
    }

    pub fn academic(&self) -> &[String] {
        &self.academic
    }

    /// True if the text contains any pharma keyword
    pub fn is_pharma_affiliation(&self, affiliation: &str) -> bool {
        contains_any(affiliation, &self.pharma)
    }

    /// True if the text contains none of the academic keywords
    pub fn is_non_academic_affiliation(&self, affiliation: &str) -> bool {
        !contains_any(affiliation, &self.academic)
    }
}

impl Default for AffiliationKeywords {
    fn default() -> Self {
        Self::new(PHARMA_KEYWORDS, ACADEMIC_KEYWORDS)
    }
}

/// Crude contact email grab: the last whitespace-delimited token of an
/// affiliation that contains `@`
///
/// The token is returned verbatim, trailing punctuation included.
pub fn extract_email(affiliation: &str) -> Option<String> {
    if !affiliation.contains('@') {
        return None;
    }
    affiliation.split_whitespace().last().map(str::to_string)
}

fn lowercase_all<I>(keywords: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().to_lowercase())
        .collect()
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k.as_str()))
}
