//! Title resolution, metadata harvesting and main-text isolation.

use kuchiki::NodeRef;
use std::collections::BTreeMap;

use crate::utils::constants::MAIN_CONTENT_SELECTORS;
use crate::utils::string_utils::{collapse_whitespace, normalize_lines};
use crate::utils::url_utils::url_host;

/// Resolve the document title: `<title>` → first `<h1>` → `og:title` →
/// URL host. First non-empty source wins; the result is never empty.
pub(crate) fn resolve_title(document: &NodeRef, url: &str) -> String {
    if let Ok(title_el) = document.select_first("title") {
        let text = collapse_whitespace(&title_el.text_contents());
        if !text.is_empty() {
            return text;
        }
    }

    if let Ok(h1) = document.select_first("h1") {
        let text = collapse_whitespace(&h1.text_contents());
        if !text.is_empty() {
            return text;
        }
    }

    if let Some(og_title) = meta_property(document, "og:title") {
        return og_title;
    }

    url_host(url).unwrap_or_else(|| url.to_string())
}

/// Harvest description/keywords/author metas plus every Open Graph property.
pub(crate) fn collect_metadata(document: &NodeRef) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();

    let Ok(metas) = document.select("meta") else {
        return metadata;
    };

    for meta in metas {
        let attrs = meta.attributes.borrow();
        let Some(content) = attrs.get("content").map(str::trim) else {
            continue;
        };
        if content.is_empty() {
            continue;
        }

        if let Some(name) = attrs.get("name") {
            let name = name.trim().to_lowercase();
            if matches!(name.as_str(), "description" | "keywords" | "author") {
                metadata.entry(name).or_insert_with(|| content.to_string());
            }
        }

        if let Some(property) = attrs.get("property") {
            if let Some(og_key) = property.trim().strip_prefix("og:") {
                if !og_key.is_empty() {
                    metadata
                        .entry(format!("og_{og_key}"))
                        .or_insert_with(|| content.to_string());
                }
            }
        }
    }

    metadata
}

/// Isolate the main text of the page.
///
/// Picks the first matching main-content container, falling back to `body`
/// and then the whole document, and extracts visible text with line-based
/// separation, blank lines dropped.
pub(crate) fn extract_body_text(document: &NodeRef) -> String {
    let container = MAIN_CONTENT_SELECTORS
        .iter()
        .find_map(|selector| {
            document
                .select_first(selector)
                .ok()
                .map(|el| el.as_node().clone())
        })
        .or_else(|| {
            document
                .select_first("body")
                .ok()
                .map(|el| el.as_node().clone())
        })
        .unwrap_or_else(|| document.clone());

    normalize_lines(&visible_text(&container))
}

/// Collect text node contents in tree order, one segment per line.
fn visible_text(container: &NodeRef) -> String {
    let mut lines = Vec::new();
    for node in container.inclusive_descendants() {
        if let Some(text) = node.as_text() {
            let segment = text.borrow();
            let trimmed = segment.trim();
            if !trimmed.is_empty() {
                lines.push(collapse_whitespace(trimmed));
            }
        }
    }
    lines.join("\n")
}

/// Read a single Open Graph property value.
fn meta_property(document: &NodeRef, property: &str) -> Option<String> {
    let metas = document.select("meta").ok()?;
    for meta in metas {
        let attrs = meta.attributes.borrow();
        if attrs.get("property") == Some(property) {
            if let Some(content) = attrs.get("content") {
                let content = content.trim();
                if !content.is_empty() {
                    return Some(content.to_string());
                }
            }
        }
    }
    None
}
