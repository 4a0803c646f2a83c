use serde::{Deserialize, Serialize};

/// Query string for `GET /api/trends`. Omitting `domain` matches any domain;
/// an empty `domain` matches records stored without one.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct TrendLookup {
    pub skill: String,
    #[serde(default)]
    pub domain: Option<String>,
}

/// Query string for `GET /api/colleges`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct CollegeQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Response of `POST /api/trends/import`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    /// `csv:<md5 of the uploaded file>`, stored as each record's `dataSource`.
    pub data_source: String,
}
