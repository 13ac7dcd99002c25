//! Command patterns and dispatch
//!
//! Matches incoming trigger text against the plugin's command shapes and
//! wires the parsed command into the resolver. The host message bus is an
//! external collaborator: this module consumes text and delivers replies
//! through the [`Replier`](crate::resolver::Replier) seam only.

use crate::config::Settings;
use crate::resolver::{ImageResolver, Replier};
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static IMAGE_RESPOND: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(image|img)( me)? (.+)").unwrap());
static ANIMATE_RESPOND: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)animate( me)? (.+)").unwrap());
static MUSTACHE_RESPOND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:mo?u)?sta(?:s|c)h(?:e|ify)?(?: me)? (.+)").unwrap());

// Passive-listen variants require the full "x me" form, anchored at the
// start of the line.
static IMAGE_HEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(image|img) me (.+)").unwrap());
static ANIMATE_HEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^animate me (.+)").unwrap());

/// A parsed plugin command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// "image me <query>": a random top image result
    Image { query: String },
    /// "animate me <query>": same, biased towards animated GIFs
    Animate { query: String },
    /// "mustache me <url-or-query>": composite a mustache onto the image
    Mustache { input: String },
}

/// Parse trigger text addressed directly to the bot
pub fn parse(text: &str) -> Option<Command> {
    if let Some(caps) = IMAGE_RESPOND.captures(text) {
        return Some(Command::Image {
            query: caps[3].to_string(),
        });
    }
    if let Some(caps) = ANIMATE_RESPOND.captures(text) {
        return Some(Command::Animate {
            query: caps[2].to_string(),
        });
    }
    if let Some(caps) = MUSTACHE_RESPOND.captures(text) {
        return Some(Command::Mustache {
            input: caps[1].to_string(),
        });
    }
    None
}

/// Parse a passively overheard line; only the image and animate shapes apply
pub fn parse_hear(text: &str) -> Option<Command> {
    if let Some(caps) = IMAGE_HEAR.captures(text) {
        return Some(Command::Image {
            query: caps[2].to_string(),
        });
    }
    if let Some(caps) = ANIMATE_HEAR.captures(text) {
        return Some(Command::Animate {
            query: caps[1].to_string(),
        });
    }
    None
}

/// Handle one incoming line.
///
/// `addressed` marks text directed at the bot; unaddressed lines are only
/// considered when the passive-listen setting is on. Resolver errors have
/// already produced their user-facing notices, so they are only logged here.
pub async fn dispatch(
    text: &str,
    addressed: bool,
    settings: Settings,
    replier: &dyn Replier,
) -> Result<()> {
    let command = if addressed {
        parse(text)
    } else if settings.hear {
        parse_hear(text)
    } else {
        None
    };

    let Some(command) = command else {
        return Ok(());
    };

    let resolver = ImageResolver::new(settings)?;

    match command {
        Command::Image { query } => match resolver.resolve(&query, false, false, replier).await {
            Ok(image) => replier.send(&image.url).await,
            Err(err) => debug!("image command ended without a result: {err}"),
        },
        Command::Animate { query } => match resolver.resolve(&query, true, false, replier).await {
            Ok(image) => replier.send(&image.url).await,
            Err(err) => debug!("animate command ended without a result: {err}"),
        },
        Command::Mustache { input } => {
            if let Err(err) = resolver.mustache(&input, replier).await {
                debug!("mustache command ended without a result: {err}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::tests::RecordingReplier;

    #[test]
    fn test_parse_image() {
        assert_eq!(
            parse("image me octocat"),
            Some(Command::Image {
                query: "octocat".to_string()
            })
        );
        assert_eq!(
            parse("img octocat"),
            Some(Command::Image {
                query: "octocat".to_string()
            })
        );
        assert_eq!(
            parse("IMAGE ME shipit squirrel"),
            Some(Command::Image {
                query: "shipit squirrel".to_string()
            })
        );
    }

    #[test]
    fn test_parse_animate() {
        assert_eq!(
            parse("animate me party parrot"),
            Some(Command::Animate {
                query: "party parrot".to_string()
            })
        );
        assert_eq!(
            parse("animate nope"),
            Some(Command::Animate {
                query: "nope".to_string()
            })
        );
    }

    #[test]
    fn test_parse_mustache_variants() {
        for text in [
            "mustache me octocat",
            "moustache me octocat",
            "stache me octocat",
            "stash me octocat",
            "mustachify octocat",
        ] {
            assert_eq!(
                parse(text),
                Some(Command::Mustache {
                    input: "octocat".to_string()
                }),
                "failed on {text:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_unrelated_text() {
        assert_eq!(parse("deploy the thing"), None);
        assert_eq!(parse("image"), None);
    }

    #[test]
    fn test_hear_requires_line_start() {
        assert_eq!(
            parse_hear("image me octocat"),
            Some(Command::Image {
                query: "octocat".to_string()
            })
        );
        assert_eq!(parse_hear("I said image me octocat"), None);
        assert!(parse_hear("img me octocat").is_some());
        assert_eq!(parse_hear("animate octocat"), None);
        assert_eq!(parse_hear("mustache me octocat"), None);
    }

    #[tokio::test]
    async fn test_dispatch_ignores_unaddressed_without_hear() {
        let replier = RecordingReplier::default();
        dispatch("image me octocat", false, Settings::default(), &replier)
            .await
            .unwrap();
        assert!(replier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_degraded_image_command() {
        let settings = Settings {
            fallback_url: "https://image-me.example.com/{q}".to_string(),
            ..Settings::default()
        };
        let replier = RecordingReplier::default();

        dispatch("image me octocat", true, settings, &replier)
            .await
            .unwrap();

        let messages = replier.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("no longer available"));
        assert_eq!(messages[1], "https://image-me.example.com/octocat#.png");
    }

    #[tokio::test]
    async fn test_dispatch_hear_animate_uses_fallback() {
        let settings = Settings {
            hear: true,
            fallback_url: "https://image-me.example.com/{q}".to_string(),
            ..Settings::default()
        };
        let replier = RecordingReplier::default();

        dispatch("animate me party parrot", false, settings, &replier)
            .await
            .unwrap();

        let messages = replier.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[1],
            "https://image-me.example.com/party%20parrot#.png"
        );
    }
}
