//! Configuration module for ImageBot-RS
//!
//! Settings are environment-sourced and read fresh at call time. The resolver
//! never touches the process environment itself; it receives a `Settings`
//! value so the degraded-mode and missing-key branches stay testable.

use std::env;

/// Environment variable holding the Custom Search API key
pub const ENV_CSE_KEY: &str = "IMAGEBOT_CSE_KEY";
/// Environment variable holding the Custom Search engine id
pub const ENV_CSE_ID: &str = "IMAGEBOT_CSE_ID";
/// Environment variable holding the Mustachify service base URL
pub const ENV_MUSTACHIFY_URL: &str = "IMAGEBOT_MUSTACHIFY_URL";
/// Environment variable enabling the passive-listen command variants
pub const ENV_HEAR: &str = "IMAGEBOT_HEAR";
/// Environment variable overriding the safe-search level
pub const ENV_SAFE_SEARCH: &str = "IMAGEBOT_SAFE_SEARCH";
/// Environment variable overriding the fallback URL template
pub const ENV_FALLBACK: &str = "IMAGEBOT_FALLBACK";

/// Fallback image template used when the search API cannot be used.
/// `{q}` is replaced with the percent-encoded query.
pub const DEFAULT_FALLBACK_URL: &str = "http://i.imgur.com/CzFTOkI.png";

/// Default safe-search level passed to the API
pub const DEFAULT_SAFE_SEARCH: &str = "high";

/// Process configuration for the plugin
#[derive(Debug, Clone)]
pub struct Settings {
    /// Custom Search API key
    pub cse_key: Option<String>,
    /// Custom Search engine id
    pub cse_id: Option<String>,
    /// Mustachify service base URL
    pub mustachify_url: Option<String>,
    /// Respond to passive "image me"/"animate me" lines
    pub hear: bool,
    /// Safe-search level passed to the API
    pub safe_search: String,
    /// Fallback URL template; a single `{q}` marker is replaced with the
    /// percent-encoded query
    pub fallback_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cse_key: None,
            cse_id: None,
            mustachify_url: None,
            hear: false,
            safe_search: DEFAULT_SAFE_SEARCH.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from the environment (IMAGEBOT_* variables).
    ///
    /// Empty values count as unset, except `IMAGEBOT_HEAR` which enables the
    /// passive-listen variants whenever the variable is present at all.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.cse_key = non_empty(ENV_CSE_KEY);
        settings.cse_id = non_empty(ENV_CSE_ID);
        settings.mustachify_url = non_empty(ENV_MUSTACHIFY_URL);
        settings.hear = env::var(ENV_HEAR).is_ok();
        if let Some(val) = non_empty(ENV_SAFE_SEARCH) {
            settings.safe_search = val;
        }
        if let Some(val) = non_empty(ENV_FALLBACK) {
            settings.fallback_url = val;
        }
        settings
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
