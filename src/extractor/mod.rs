//! Content extraction: rendered markup in, structured document out.
//!
//! A pure function of (markup, source URL) — no network, no browser access.
//! Extraction never fails: malformed or missing substructures degrade to
//! empty defaults rather than aborting the document.

mod clean;
mod fields;
mod media;
pub mod schema;
mod tables;

pub use schema::{AssetRef, DocumentImage, ImageRef, LinkRef, StructuredDocument, Table};

use chrono::{DateTime, Utc};
use kuchiki::traits::TendrilSink;
use log::info;
use url::Url;

/// Extract a structured document from rendered markup.
pub fn extract(html: &str, url: &str) -> StructuredDocument {
    extract_at(html, url, Utc::now())
}

/// Extraction with an explicit timestamp.
///
/// With a fixed timestamp the result is a pure function of its inputs:
/// extracting the same markup twice yields identical documents.
pub fn extract_at(html: &str, url: &str, when: DateTime<Utc>) -> StructuredDocument {
    extract_inner(html, url, url, when)
}

/// Extraction for a page served from somewhere other than the requested
/// URL (redirects).
///
/// The document records `source_url`, the URL the caller asked for, while
/// relative URLs resolve against `base_url`, where the page actually lives.
pub fn extract_redirected(html: &str, source_url: &str, base_url: &str) -> StructuredDocument {
    extract_inner(html, source_url, base_url, Utc::now())
}

fn extract_inner(
    html: &str,
    source_url: &str,
    base_url: &str,
    when: DateTime<Utc>,
) -> StructuredDocument {
    let document = kuchiki::parse_html().one(html);
    let base = Url::parse(base_url).ok();

    clean::strip_noise(&document);

    let title = fields::resolve_title(&document, source_url);
    let metadata = fields::collect_metadata(&document);
    let body_text = fields::extract_body_text(&document);
    let tables = tables::extract_tables(&document);
    let images = media::extract_images(&document, base.as_ref());
    let links = media::extract_links(&document, base.as_ref());

    info!(
        "Extracted '{title}': {} tables, {} images, {} links, {} text bytes",
        tables.len(),
        images.len(),
        links.len(),
        body_text.len()
    );

    StructuredDocument {
        source_url: source_url.to_string(),
        title,
        metadata,
        body_text,
        tables,
        images,
        links,
        extracted_at: when,
    }
}
