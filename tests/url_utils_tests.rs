//! URL normalization and resolution rules.

use chrono::{TimeZone, Utc};
use pagelift::utils::{
    is_http_url, normalize_input_url, report_filename_stem, resolve_image_src, resolve_link_href,
    url_host,
};
use proptest::prelude::*;
use url::Url;

fn base() -> Url {
    Url::parse("https://ex.com/dir/page.html").unwrap()
}

#[test]
fn input_urls_default_to_https() {
    assert_eq!(
        normalize_input_url("ex.com/p"),
        Some("https://ex.com/p".to_string())
    );
    assert_eq!(
        normalize_input_url("  http://ex.com  "),
        Some("http://ex.com".to_string())
    );
    assert_eq!(
        normalize_input_url("https://ex.com"),
        Some("https://ex.com".to_string())
    );
    assert_eq!(normalize_input_url("   "), None);
    assert_eq!(normalize_input_url(""), None);
}

#[test]
fn http_url_predicate() {
    assert!(is_http_url("https://ex.com"));
    assert!(is_http_url("http://ex.com"));
    assert!(!is_http_url("ftp://ex.com"));
    assert!(!is_http_url("ex.com"));
    assert!(!is_http_url(""));
}

#[test]
fn image_sources_resolve_against_the_page() {
    let base = base();

    // Absolute sources pass through
    assert_eq!(
        resolve_image_src(Some(&base), "https://cdn.ex.com/a.png"),
        Some("https://cdn.ex.com/a.png".to_string())
    );
    // Inline payloads pass through untouched
    assert_eq!(
        resolve_image_src(Some(&base), "data:image/png;base64,AAAA"),
        Some("data:image/png;base64,AAAA".to_string())
    );
    // Protocol-relative sources get https
    assert_eq!(
        resolve_image_src(Some(&base), "//cdn.ex.com/b.png"),
        Some("https://cdn.ex.com/b.png".to_string())
    );
    // Root-relative and document-relative join against the base
    assert_eq!(
        resolve_image_src(Some(&base), "/c.png"),
        Some("https://ex.com/c.png".to_string())
    );
    assert_eq!(
        resolve_image_src(Some(&base), "d.png"),
        Some("https://ex.com/dir/d.png".to_string())
    );
    // Relative source with no base cannot resolve
    assert_eq!(resolve_image_src(None, "d.png"), None);
    assert_eq!(resolve_image_src(Some(&base), "   "), None);
}

#[test]
fn link_hrefs_drop_fragments_and_keep_contact_schemes() {
    let base = base();

    assert_eq!(resolve_link_href(Some(&base), "#top"), None);
    assert_eq!(resolve_link_href(Some(&base), "#"), None);
    assert_eq!(
        resolve_link_href(Some(&base), "mailto:a@ex.com"),
        Some("mailto:a@ex.com".to_string())
    );
    assert_eq!(
        resolve_link_href(Some(&base), "tel:+33123456789"),
        Some("tel:+33123456789".to_string())
    );
    assert_eq!(
        resolve_link_href(Some(&base), "/about"),
        Some("https://ex.com/about".to_string())
    );
    assert_eq!(
        resolve_link_href(Some(&base), "//ex.org/x"),
        Some("https://ex.org/x".to_string())
    );
}

#[test]
fn host_extraction() {
    assert_eq!(url_host("https://www.ex.com/p"), Some("www.ex.com".to_string()));
    assert_eq!(url_host("not a url"), None);
}

#[test]
fn report_stem_combines_domain_and_timestamp() {
    let when = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
    assert_eq!(
        report_filename_stem("https://www.ex.co.uk/page", when),
        "ex_co_uk_20240309_140507"
    );
    assert_eq!(report_filename_stem("garbage", when), "page_20240309_140507");
}

proptest! {
    /// Whatever the source looks like, a resolved image URL is absolute:
    /// it parses on its own, with no base.
    #[test]
    fn resolved_image_urls_are_absolute(src in "\\PC{0,40}") {
        let base = base();
        if let Some(resolved) = resolve_image_src(Some(&base), &src) {
            prop_assert!(Url::parse(&resolved).is_ok(), "not absolute: {resolved}");
        }
    }

    /// Resolved link URLs are absolute too, and never fragment-only.
    #[test]
    fn resolved_link_urls_are_absolute(href in "\\PC{0,40}") {
        let base = base();
        if let Some(resolved) = resolve_link_href(Some(&base), &href) {
            prop_assert!(Url::parse(&resolved).is_ok(), "not absolute: {resolved}");
            prop_assert!(!resolved.starts_with('#'));
        }
    }
}
