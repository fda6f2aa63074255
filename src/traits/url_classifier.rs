//! URL classification trait abstraction.
//!
//! Decides whether typed text is a direct URL or a search query, and turns
//! either into something navigable. The default implementation lives in
//! [`crate::url_tools`].

/// Classifies and resolves user-entered text into navigable URLs.
pub trait UrlClassifier: Send + Sync {
    /// Whether the text looks like a URL rather than a search query.
    fn is_url(&self, text: &str) -> bool;

    /// Normalize a URL-ish string into a loadable URL (e.g. add a scheme).
    fn normalize(&self, text: &str) -> String;

    /// Build a search-engine URL for a free-text query.
    fn create_search_url(&self, text: &str) -> String;
}
