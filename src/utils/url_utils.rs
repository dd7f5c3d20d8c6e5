//! URL resolution and validation utilities.
//!
//! All image and link URLs exposed in a structured document are absolute;
//! the resolution rules here are the single place where protocol-relative
//! and page-relative forms get upgraded.

use chrono::{DateTime, Utc};
use url::Url;

/// Check whether a string is a well-formed http(s) URL.
#[must_use]
pub fn is_http_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Normalize a caller-supplied URL: default a missing scheme to `https://`
/// and verify the result parses as http(s).
pub fn normalize_input_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    if is_http_url(&candidate) {
        Some(candidate)
    } else {
        None
    }
}

/// Resolve an image `src` to its absolute form.
///
/// Protocol-relative sources are upgraded to `https:`, page-relative sources
/// are joined against the page URL, `data:` payloads pass through untouched.
/// Returns `None` when the source cannot be made absolute.
#[must_use]
pub fn resolve_image_src(base: Option<&Url>, src: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }

    if src.starts_with("data:") {
        return Some(src.to_string());
    }
    if let Some(rest) = src.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if src.starts_with("http://") || src.starts_with("https://") {
        return Some(src.to_string());
    }

    base.and_then(|b| b.join(src).ok()).map(Url::into)
}

/// Resolve an anchor `href` to its absolute form.
///
/// Fragment-only hrefs are dropped. `mailto:`/`tel:` targets are kept
/// verbatim since they are already absolute in their own scheme.
#[must_use]
pub fn resolve_link_href(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if let Some(rest) = href.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if href.starts_with("http://")
        || href.starts_with("https://")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
    {
        return Some(href.to_string());
    }

    base.and_then(|b| b.join(href).ok()).map(Url::into)
}

/// Extract the host of a URL, used as the last-resort title fallback.
#[must_use]
pub fn url_host(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

/// Deterministic filename stem for exported reports: `<domain>_<YYYYMMDD_HHMMSS>`.
///
/// The `www.` prefix is stripped and remaining dots become underscores so the
/// stem is filesystem-safe on every platform. Exporters append their own
/// extension.
#[must_use]
pub fn report_filename_stem(url: &str, when: DateTime<Utc>) -> String {
    let domain = url_host(url)
        .unwrap_or_else(|| "page".to_string())
        .trim_start_matches("www.")
        .replace('.', "_");

    format!("{domain}_{}", when.format("%Y%m%d_%H%M%S"))
}
