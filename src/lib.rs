//! ImageBot-RS: a chat-bot image search plugin written in Rust
//!
//! Answers "image me", "animate me", and "mustache me" commands by querying
//! the Google Custom Search API for image results, with a deterministic
//! offline fallback when credentials are absent or quota is exhausted.

pub mod commands;
pub mod config;
pub mod network;
pub mod resolver;
pub mod search;

pub use config::Settings;
pub use resolver::{ImageResolver, Picker, RandomPicker, Replier, ResolveError, ResolvedImage};
pub use search::{SearchRequest, SearchResponse};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for search API requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 5;
