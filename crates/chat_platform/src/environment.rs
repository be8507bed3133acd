//! Device labelling and screen-capture preconditions.

use url::Url;

/// Placeholder used when the browser cannot be identified from the user agent.
pub const UNKNOWN_BROWSER: &str = "unknown browser";
/// Placeholder used when the operating system cannot be identified from the user agent.
pub const UNKNOWN_OS: &str = "unknown os";
/// Placeholder used when there is no page location to name the app after.
pub const UNKNOWN_APP: &str = "unknown app";

/// Message returned when screen capture is blocked by an insecure page origin.
pub const SCREEN_CAPTURE_REQUIRES_HTTPS: &str =
    "You need to be using HTTPS to place a screen-sharing call.";

// Order matters: Chromium derivatives also advertise "Chrome" and "Safari", and Chrome on iOS
// advertises "Safari".
const BROWSER_MARKERS: &[(&str, &str)] = &[
    ("Edg/", "Edge"),
    ("Edge/", "Edge"),
    ("EdgiOS/", "Edge"),
    ("OPR/", "Opera"),
    ("Opera", "Opera"),
    ("Vivaldi/", "Vivaldi"),
    ("YaBrowser/", "Yandex"),
    ("SamsungBrowser/", "Samsung Browser"),
    ("Electron/", "Electron"),
    ("FxiOS/", "Firefox"),
    ("Firefox/", "Firefox"),
    ("CriOS/", "Chrome"),
    ("Chromium/", "Chromium"),
    ("Chrome/", "Chrome"),
    ("MSIE ", "IE"),
    ("Trident/", "IE"),
];

// iOS and Android before their desktop look-alikes ("like Mac OS X", "Linux; Android").
const OS_MARKERS: &[(&str, &str)] = &[
    ("Windows Phone", "Windows Phone"),
    ("Windows", "Windows"),
    ("iPhone", "iOS"),
    ("iPad", "iOS"),
    ("iPod", "iOS"),
    ("Android", "Android"),
    ("CrOS", "Chromium OS"),
    ("Mac OS X", "Mac OS"),
    ("Macintosh", "Mac OS"),
    ("Ubuntu", "Ubuntu"),
    ("Fedora", "Fedora"),
    ("FreeBSD", "FreeBSD"),
    ("OpenBSD", "OpenBSD"),
    ("Linux", "Linux"),
];

/// Detects the browser name from a user-agent string.
pub fn detect_browser(user_agent: &str) -> Option<&'static str> {
    if let Some(name) = first_marker(user_agent, BROWSER_MARKERS) {
        return Some(name);
    }
    if user_agent.contains("Safari/") {
        let mobile = ["iPhone", "iPad", "iPod"]
            .iter()
            .any(|device| user_agent.contains(device));
        return Some(if mobile { "Mobile Safari" } else { "Safari" });
    }
    None
}

/// Detects the operating system name from a user-agent string.
pub fn detect_os(user_agent: &str) -> Option<&'static str> {
    first_marker(user_agent, OS_MARKERS)
}

fn first_marker(user_agent: &str, markers: &[(&str, &'static str)]) -> Option<&'static str> {
    markers
        .iter()
        .find(|(marker, _)| user_agent.contains(marker))
        .map(|(_, name)| *name)
}

/// Strips the query string and fragment from a page URL.
///
/// Unparseable input is cut at the first `?` or `#` instead.
pub fn strip_query_and_fragment(page_url: &str) -> String {
    match Url::parse(page_url) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.into()
        }
        Err(_) => page_url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Builds `"<app url> via <browser> on <os>"` for the default device display name.
pub fn device_display_name(page_url: Option<&str>, user_agent: Option<&str>) -> String {
    let app_name = page_url
        .map(strip_query_and_fragment)
        .unwrap_or_else(|| UNKNOWN_APP.to_string());
    let user_agent = user_agent.unwrap_or_default();
    let browser = detect_browser(user_agent).unwrap_or(UNKNOWN_BROWSER);
    let os = detect_os(user_agent).unwrap_or(UNKNOWN_OS);
    format!("{app_name} via {browser} on {os}")
}

/// Returns the screen-capture blocker for a page protocol, if any.
///
/// Browsers only allow screen capture from secure pages. `None` for `protocol` means there is
/// no page at all, which is treated as insecure.
pub fn screen_capture_error_string(protocol: Option<&str>) -> Option<&'static str> {
    match protocol {
        Some("https:") => None,
        _ => Some(SCREEN_CAPTURE_REQUIRES_HTTPS),
    }
}
