//! ImageBot-RS: a chat-bot image search plugin written in Rust
//!
//! One-shot binary: treats its arguments as a single addressed command line
//! and prints every reply to stdout.

use anyhow::Result;
use async_trait::async_trait;
use imagebot_rs::{commands, config::Settings, resolver::Replier};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Replier that prints every message to stdout
struct StdoutReplier;

#[async_trait]
impl Replier for StdoutReplier {
    async fn send(&self, message: &str) {
        println!("{message}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        print_usage();
        return Ok(());
    }

    // Configuration is read fresh per invocation
    let settings = Settings::from_env();

    commands::dispatch(&text, true, settings, &StdoutReplier).await
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
ImageBot-RS v{}
A chat-bot image search plugin written in Rust

USAGE:
    imagebot-rs <command text>

COMMANDS:
    image me <query>            A random top image result for <query>
    animate me <query>          The same, biased towards animated GIFs
    mustache me <url|query>     Adds a mustache to the URL or query result

ENVIRONMENT VARIABLES:
    IMAGEBOT_CSE_KEY            Custom Search API key
    IMAGEBOT_CSE_ID             Custom Search engine id
    IMAGEBOT_MUSTACHIFY_URL     Mustachify service base URL
    IMAGEBOT_HEAR               Enable passive-listen command variants
    IMAGEBOT_SAFE_SEARCH        Safe-search level (default "high")
    IMAGEBOT_FALLBACK           Fallback URL template, {{q}} is the query"#,
        imagebot_rs::VERSION
    );
}
