use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESearchResult {
    pub esearchresult: ESearchData,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESearchData {
    pub idlist: Option<Vec<String>>,
    pub count: Option<String>,
    #[serde(rename = "ERROR")]
    pub error: Option<String>,
}
