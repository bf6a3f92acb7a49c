//! Lenient serde mirror of a single `<PubmedArticle>` element
//!
//! Every node is optional so that decoding only fails on structurally
//! broken fragments; required-field checks happen in `converters`.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(super) struct PubmedArticleXml {
    #[serde(rename = "MedlineCitation")]
    pub medline_citation: Option<MedlineCitationXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct MedlineCitationXml {
    #[serde(rename = "PMID")]
    pub pmid: Option<PmidXml>,
    #[serde(rename = "Article")]
    pub article: Option<ArticleXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PmidXml {
    #[serde(rename = "$text", default)]
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ArticleXml {
    #[serde(rename = "ArticleTitle")]
    pub article_title: Option<String>,
    #[serde(rename = "Journal")]
    pub journal: Option<JournalXml>,
    #[serde(rename = "AuthorList")]
    pub author_list: Option<AuthorListXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct JournalXml {
    #[serde(rename = "JournalIssue")]
    pub journal_issue: Option<JournalIssueXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct JournalIssueXml {
    #[serde(rename = "PubDate")]
    pub pub_date: Option<PubDateXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PubDateXml {
    #[serde(rename = "Year")]
    pub year: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct AuthorListXml {
    /// A lone `<Author>` decodes as a one-element list
    #[serde(rename = "Author", default)]
    pub authors: Vec<AuthorXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct AuthorXml {
    #[serde(rename = "LastName")]
    pub last_name: Option<String>,
    #[serde(rename = "ForeName")]
    pub fore_name: Option<String>,
    #[serde(rename = "AffiliationInfo", default)]
    pub affiliation_info: Vec<AffiliationInfoXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct AffiliationInfoXml {
    #[serde(rename = "Affiliation")]
    pub affiliation: Option<String>,
}
