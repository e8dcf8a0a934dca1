//! Core types for the Open Graph scraping service

use serde::{Deserialize, Serialize};

/// Open Graph metadata extracted from a fetched page
///
/// Every field is optional; a tag missing from the document yields
/// `None`, which serializes as JSON `null`. The `type` field is
/// overwritten from service configuration before every response, so the
/// cached value of that one field is never what callers observe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapResult {
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub og_type: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}
