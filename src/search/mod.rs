//! Search request construction and response interpretation for the image API

mod request;
mod response;

pub use request::SearchRequest;
pub use response::{ApiError, ApiErrorEntry, ImageItem, SearchResponse};

/// Google Custom Search endpoint queried for image results
pub const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
