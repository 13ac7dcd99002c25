//! Mustache compositing pass-through
//!
//! Accepts either a direct image URL or a free-text query, and composes the
//! source image onto the configured Mustachify endpoint.

use super::{ImageResolver, Picker, Replier, ResolveError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Absolute HTTP(S) URL shape
static ABSOLUTE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^https?://").unwrap());

/// Image shown when the Mustachify service is not configured
const UNCONFIGURED_PLACEHOLDER: &str = "http://i.imgur.com/BXbGJ1N.png";

impl<P: Picker> ImageResolver<P> {
    /// Composite a mustache onto `input`, which is either a direct URL (used
    /// as-is, no search issued) or a query resolved with `face_only` set.
    ///
    /// The configured service base is checked before any network call; when
    /// it is absent a fixed notice-plus-placeholder pair is sent instead.
    pub async fn mustache(
        &self,
        input: &str,
        replier: &dyn Replier,
    ) -> Result<(), ResolveError> {
        let Some(base) = self.settings.mustachify_url.as_deref() else {
            replier
                .send("Sorry, the Mustachify server is not configured.")
                .await;
            replier.send(UNCONFIGURED_PLACEHOLDER).await;
            return Ok(());
        };
        let base = base.strip_suffix('/').unwrap_or(base);

        let source = if ABSOLUTE_URL.is_match(input) {
            input.to_string()
        } else {
            self.resolve(input, false, true, replier).await?.url
        };

        replier
            .send(&format!("{base}/rand?src={}", urlencoding::encode(&source)))
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{configured_settings, PinnedPicker, RecordingReplier};
    use super::*;
    use crate::config::Settings;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_unconfigured_base_sends_fixed_pair() {
        let resolver = ImageResolver::new(Settings::default()).unwrap();
        let replier = RecordingReplier::default();

        resolver.mustache("octocat", &replier).await.unwrap();

        assert_eq!(
            replier.messages(),
            vec![
                "Sorry, the Mustachify server is not configured.".to_string(),
                "http://i.imgur.com/BXbGJ1N.png".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_direct_url_skips_search() {
        let settings = Settings {
            mustachify_url: Some("https://mustache.example.com/generate/".to_string()),
            ..Settings::default()
        };
        let resolver = ImageResolver::new(settings).unwrap();
        let replier = RecordingReplier::default();

        resolver
            .mustache("https://octodex.github.com/images/original.png", &replier)
            .await
            .unwrap();

        assert_eq!(
            replier.messages(),
            vec![
                "https://mustache.example.com/generate/rand?src=https%3A%2F%2Foctodex.github.com%2Fimages%2Foriginal.png"
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_query_resolved_with_face_restriction() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("q", "octocat"))
            .and(query_param("imgType", "face"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {"link": "https://octodex.github.com/images/original.png"}
                ]
            })))
            .mount(&server)
            .await;

        let settings = Settings {
            mustachify_url: Some("https://mustache.example.com/generate".to_string()),
            ..configured_settings()
        };
        let resolver = ImageResolver::with_picker(settings, PinnedPicker(0))
            .unwrap()
            .with_search_url(format!("{}/customsearch/v1", server.uri()));
        let replier = RecordingReplier::default();

        resolver.mustache("octocat", &replier).await.unwrap();

        assert_eq!(
            replier.messages(),
            vec![
                "https://mustache.example.com/generate/rand?src=https%3A%2F%2Foctodex.github.com%2Fimages%2Foriginal.png"
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_resolver_notice_precedes_nothing_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let settings = Settings {
            mustachify_url: Some("https://mustache.example.com/generate".to_string()),
            ..configured_settings()
        };
        let resolver = ImageResolver::with_picker(settings, PinnedPicker(0))
            .unwrap()
            .with_search_url(format!("{}/customsearch/v1", server.uri()));
        let replier = RecordingReplier::default();

        let result = resolver.mustache("octocat", &replier).await;

        assert!(matches!(result, Err(ResolveError::NoResults { .. })));
        assert_eq!(
            replier.messages(),
            vec!["Oops. I had trouble searching 'octocat'. Try later.".to_string()]
        );
    }
}
