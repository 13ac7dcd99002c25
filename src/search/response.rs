//! Response types for the Custom Search JSON payload

use serde::Deserialize;

/// Deserialized search response. The `fields=items(link)` request filter
/// means a successful payload carries links only; error payloads carry the
/// `error` object instead.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    /// Search results, absent when nothing was found
    pub items: Option<Vec<ImageItem>>,
    /// Error payload, present on some no-result responses
    pub error: Option<ApiError>,
}

/// A single image result
#[derive(Debug, Clone, Deserialize)]
pub struct ImageItem {
    /// Direct link to the image
    pub link: String,
}

/// Error object carried inside an otherwise valid response body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiError {
    /// Individual error entries
    pub errors: Option<Vec<ApiErrorEntry>>,
}

/// A single entry of an error payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorEntry {
    /// Human-readable error message
    pub message: String,
    /// Link to documentation about the error
    #[serde(rename = "extendedHelp")]
    pub extended_help: Option<String>,
}
