//! URL normalization used for duplicate detection.
//!
//! Equality between saved articles is decided on a normalized form of the
//! URL: everything from the tracking-parameter marker (`?utm`) onward is
//! stripped. This is deliberately aggressive only on that one marker; other
//! query parameters are left alone because they can be load-bearing.

/// Marker that starts the tracking-parameter suffix of a URL.
pub const TRACKING_MARKER: &str = "?utm";

/// Strips the tracking-parameter suffix from a URL.
///
/// For a URL without the marker this is the identity function.
///
/// # Examples
///
/// ```
/// use wayback_utils::urls::normalize_url;
///
/// assert_eq!(
///     normalize_url("https://a.example/x?utm_source=feed&y=2"),
///     "https://a.example/x"
/// );
/// assert_eq!(normalize_url("https://a.example/x"), "https://a.example/x");
/// ```
#[must_use]
pub fn normalize_url(url: &str) -> String {
    match url.find(TRACKING_MARKER) {
        Some(index) => url[..index].to_string(),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_utm_suffix() {
        assert_eq!(
            normalize_url("https://a.example/x?utm=1&y=2"),
            "https://a.example/x"
        );
    }

    #[test]
    fn test_normalize_strips_utm_source_suffix() {
        assert_eq!(
            normalize_url("https://a.example/x?utm_source=newsletter&utm_medium=email"),
            "https://a.example/x"
        );
    }

    #[test]
    fn test_normalize_without_marker_is_identity() {
        let url = "https://a.example/x?page=2#section";
        assert_eq!(normalize_url(url), url);
    }

    #[test]
    fn test_normalize_equates_tracked_and_untracked_forms() {
        assert_eq!(
            normalize_url("https://a.example/x?utm=1&y=2"),
            normalize_url("https://a.example/x")
        );
    }

    #[test]
    fn test_normalize_preserves_unrelated_query() {
        assert_eq!(
            normalize_url("https://a.example/search?q=rust"),
            "https://a.example/search?q=rust"
        );
    }

    #[test]
    fn test_normalize_empty_string() {
        assert_eq!(normalize_url(""), "");
    }
}
