use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored object as reported by the listing backend.
///
/// Field names follow the blob store wire format so a listing can be passed
/// through to the dashboard unchanged. Identity is `pathname`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageObject {
    pub pathname: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl StorageObject {
    /// Builds an object carrying only the mandatory fields.
    pub fn new<N: Into<String>, U: Into<String>>(pathname: N, url: U) -> Self {
        Self {
            pathname: pathname.into(),
            url: url.into(),
            download_url: None,
            size: None,
            uploaded_at: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.pathname
    }
}

/// One page of the blob store list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlobResult {
    pub blobs: Vec<StorageObject>,
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}
