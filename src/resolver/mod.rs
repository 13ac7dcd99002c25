//! The image resolver pipeline
//!
//! Turns a free-text query plus intent flags into a single image URL, either
//! from a live Custom Search request or from the deterministic offline
//! fallback template. All user-facing notices go out through the [`Replier`]
//! seam; operator-facing diagnostics go to the log.

mod mustache;
mod normalize;

pub use normalize::normalize;

use crate::config::{self, Settings};
use crate::network::HttpClient;
use crate::search::{SearchRequest, SearchResponse, SEARCH_ENDPOINT};
use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;
use tracing::error;

/// Outbound message delivery to the invoking collaborator. Used for final
/// answers and intermediate diagnostic notices alike.
#[async_trait]
pub trait Replier: Send + Sync {
    /// Deliver a single message
    async fn send(&self, message: &str);
}

/// Selection among multiple search results, injectable so tests can pin the
/// chosen element.
pub trait Picker: Send + Sync {
    /// Return an index in `0..len`; `len` is always at least 1
    fn pick(&self, len: usize) -> usize;
}

/// Uniformly random selection
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl Picker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Final output of the resolver. The URL always ends in an image extension
/// or carries the `#.png` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// Normalized image URL
    pub url: String,
}

impl ResolvedImage {
    fn new(url: String) -> Self {
        Self { url }
    }
}

impl std::fmt::Display for ResolvedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Terminal outcomes of one resolver invocation. Each variant has already
/// produced its user-facing notice by the time it is returned; none is fatal
/// to the process.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Engine id configured but the API key is missing
    #[error("missing search API key")]
    MissingApiKey,
    /// The search succeeded but returned no results
    #[error("no results for '{query}'")]
    NoResults { query: String },
    /// Non-200 response other than the quota status
    #[error("bad HTTP response: {status}")]
    BadStatus { status: u16 },
    /// Transport failure or unreadable response body
    #[error("transport error: {0}")]
    Transport(anyhow::Error),
}

/// Computes a final image URL from a query and intent flags
pub struct ImageResolver<P: Picker = RandomPicker> {
    settings: Settings,
    client: HttpClient,
    picker: P,
    search_url: String,
}

impl ImageResolver<RandomPicker> {
    /// Create a resolver with uniformly random result selection
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_picker(settings, RandomPicker)
    }
}

impl<P: Picker> ImageResolver<P> {
    /// Create a resolver with an explicit result picker
    pub fn with_picker(settings: Settings, picker: P) -> Result<Self> {
        Ok(Self {
            settings,
            client: HttpClient::new()?,
            picker,
            search_url: SEARCH_ENDPOINT.to_string(),
        })
    }

    /// Override the search endpoint
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    /// Resolve `query` to a single image URL.
    ///
    /// With no engine id configured this degrades to the fallback template
    /// after a notice; with an engine id but no API key it aborts. Otherwise
    /// exactly one GET is issued: 200 with results picks one at random, 200
    /// without results is terminal, 403 recovers via the fallback, and any
    /// other status or transport failure is terminal.
    pub async fn resolve(
        &self,
        query: &str,
        animated: bool,
        face_only: bool,
        replier: &dyn Replier,
    ) -> std::result::Result<ResolvedImage, ResolveError> {
        let Some(cse_id) = self.settings.cse_id.clone() else {
            // Degraded mode, not an error: answer from the fallback template.
            replier
                .send(
                    "Google Image Search API is no longer available. \
                     Please set up a Custom Search Engine and configure its id and key.",
                )
                .await;
            return Ok(self.fallback(query, animated));
        };

        let Some(cse_key) = self.settings.cse_key.clone() else {
            error!("Missing environment variable {}", config::ENV_CSE_KEY);
            replier
                .send(&format!(
                    "Missing server environment variable {}.",
                    config::ENV_CSE_KEY
                ))
                .await;
            return Err(ResolveError::MissingApiKey);
        };

        let request = SearchRequest {
            query: query.to_string(),
            animated,
            face_only,
            safe: self.settings.safe_search.clone(),
            cse_id,
            cse_key,
        };

        let response = match self
            .client
            .get_with_params(&self.search_url, &request.params())
            .await
        {
            Ok(response) => response,
            Err(err) => {
                replier.send(&format!("Encountered an error :( {err}")).await;
                return Err(ResolveError::Transport(err));
            }
        };

        if response.status == 403 {
            // Quota exhaustion: notify, then still answer from the fallback.
            replier
                .send("Daily image quota exceeded, using alternate source.")
                .await;
            return Ok(self.fallback(query, animated));
        }

        if !response.is_success() {
            replier
                .send(&format!("Bad HTTP response :( {}", response.status))
                .await;
            return Err(ResolveError::BadStatus {
                status: response.status,
            });
        }

        let parsed: SearchResponse = match response.json() {
            Ok(parsed) => parsed,
            Err(err) => {
                replier.send(&format!("Encountered an error :( {err}")).await;
                return Err(ResolveError::Transport(err));
            }
        };

        match parsed.items.as_deref() {
            Some(items) if !items.is_empty() => {
                let link = &items[self.picker.pick(items.len())].link;
                Ok(ResolvedImage::new(normalize(link, animated)))
            }
            _ => {
                replier
                    .send(&format!(
                        "Oops. I had trouble searching '{query}'. Try later."
                    ))
                    .await;
                // A payload with results never reaches this branch, so the
                // error entries are only ever logged on the no-results path.
                if let Some(errors) = parsed.error.as_ref().and_then(|e| e.errors.as_deref()) {
                    for entry in errors {
                        error!("{}", entry.message);
                        if let Some(help) = &entry.extended_help {
                            error!("(see {help})");
                        }
                    }
                }
                Err(ResolveError::NoResults {
                    query: query.to_string(),
                })
            }
        }
    }

    /// Deterministic offline answer: the fallback template with its single
    /// `{q}` marker replaced by the percent-encoded query.
    fn fallback(&self, query: &str, animated: bool) -> ResolvedImage {
        let url = self
            .settings
            .fallback_url
            .replacen("{q}", &urlencoding::encode(query), 1);
        ResolvedImage::new(normalize(&url, animated))
    }
}
