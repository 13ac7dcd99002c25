//! URL normalization for resolved image links

use once_cell::sync::Lazy;
use regex::Regex;

/// Giphy thumbnail path, rewritten to the full-size asset when animating
static GIPHY_THUMBNAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(giphy\.com/.*)/.+_s\.gif$").unwrap());

/// Trailing image extension check
static IMAGE_EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(png|jpe?g|gif)$").unwrap());

/// Normalize an image URL so downstream consumers can treat it uniformly as
/// an image link.
///
/// When `animated` is set, a giphy thumbnail (`..._s.gif`) is rewritten to
/// the canonical full-size `giphy.gif` path. In all cases a URL without a
/// recognizable image extension gets a `#.png` marker appended. Idempotent.
pub fn normalize(url: &str, animated: bool) -> String {
    if animated {
        ensure_image_extension(&GIPHY_THUMBNAIL.replace(url, "${1}/giphy.gif"))
    } else {
        ensure_image_extension(url)
    }
}

/// Force the URL to look like an image URL by appending `#.png`
fn ensure_image_extension(url: &str) -> String {
    if IMAGE_EXTENSION.is_match(url) {
        url.to_string()
    } else {
        format!("{url}#.png")
    }
}
