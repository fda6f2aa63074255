//! Default URL classification.
//!
//! Heuristics for telling typed URLs apart from search queries, plus
//! normalization and search-URL construction. The search template comes
//! from [`crate::config::AppConfig`]; `%s` is replaced with the
//! percent-encoded query.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::traits::UrlClassifier;

/// Matches text with an explicit scheme, e.g. `https://...` or `about:`.
static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:").expect("static regex"));

/// Matches host-like text: something.dot.something, optionally a port/path.
static HOST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s/]+\.[^\s/]{2,}(:\d+)?(/\S*)?$").expect("static regex"));

/// Classifier backed by the regexes above and the `url` crate.
pub struct DefaultUrlClassifier {
    search_url_template: String,
}

impl DefaultUrlClassifier {
    pub fn new(search_url_template: impl Into<String>) -> Self {
        Self {
            search_url_template: search_url_template.into(),
        }
    }
}

impl UrlClassifier for DefaultUrlClassifier {
    fn is_url(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
            return false;
        }
        if SCHEME_RE.is_match(trimmed) {
            return true;
        }
        trimmed == "localhost"
            || trimmed.starts_with("localhost:")
            || trimmed.starts_with("localhost/")
            || HOST_RE.is_match(trimmed)
    }

    fn normalize(&self, text: &str) -> String {
        let trimmed = text.trim();
        if SCHEME_RE.is_match(trimmed) {
            // Already has a scheme; reserialize when parsable to clean it up.
            return Url::parse(trimmed)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| trimmed.to_string());
        }
        let with_scheme = format!("http://{trimmed}");
        Url::parse(&with_scheme)
            .map(|u| u.to_string())
            .unwrap_or(with_scheme)
    }

    fn create_search_url(&self, text: &str) -> String {
        let query: String = url::form_urlencoded::byte_serialize(text.trim().as_bytes()).collect();
        self.search_url_template.replace("%s", &query)
    }
}
