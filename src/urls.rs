//! Well-known URLs and URL predicates.

use url::Url;

/// The built-in home surface. Occupies a real navigation-history slot, which
/// is why UI back availability must skip it (see
/// [`crate::session::SessionRepo::set_back_twice_probe`]).
pub const APP_URL_HOME: &str = "tvshell:home";

/// Whether the URL is the YouTube TV web app, which handles back navigation
/// in-page and needs the special-cased signals in
/// [`crate::session::SessionEvent`].
pub fn is_youtube_tv(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    (host == "youtube.com" || host.ends_with(".youtube.com"))
        && parsed.path().starts_with("/tv")
}

/// The authority ("host") of a URL, if it has one.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
}
