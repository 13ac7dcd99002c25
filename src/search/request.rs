//! Search request construction

use serde::Serialize;

/// Parameters for a single image search. Constructed fresh per invocation and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    /// Free-text query
    pub query: String,
    /// Prefer animated GIF results
    pub animated: bool,
    /// Restrict results to face imagery
    pub face_only: bool,
    /// Safe-search level
    pub safe: String,
    /// Custom Search engine id
    pub cse_id: String,
    /// Custom Search API key
    pub cse_key: String,
}

impl SearchRequest {
    /// Query parameters for the Custom Search endpoint.
    ///
    /// The `fields` filter restricts the payload to result links only, which
    /// is all the resolver ever reads.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.query.clone()),
            ("searchType", "image".to_string()),
            ("safe", self.safe.clone()),
            ("fields", "items(link)".to_string()),
            ("cx", self.cse_id.clone()),
            ("key", self.cse_key.clone()),
        ];

        if self.animated {
            params.push(("fileType", "gif".to_string()));
            params.push(("hq", "animated".to_string()));
            params.push(("tbs", "itp:animated".to_string()));
        }

        if self.face_only {
            params.push(("imgType", "face".to_string()));
        }

        params
    }
}
