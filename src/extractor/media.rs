//! Image and link cataloguing with URL normalization and de-duplication.

use kuchiki::NodeRef;
use std::collections::HashSet;
use url::Url;

use super::schema::{DocumentImage, ImageRef, LinkRef};
use crate::utils::string_utils::collapse_whitespace;
use crate::utils::url_utils::{resolve_image_src, resolve_link_href};

/// Lazy-load attribute fallbacks probed after `src`, in order.
const IMAGE_SRC_ATTRIBUTES: &[&str] = &["src", "data-src", "data-lazy-src"];

/// Catalog every image with a resolvable source.
///
/// Sources are made absolute (protocol-relative upgraded to https, relative
/// resolved against the page URL); inline-encoded `data:` sources pass
/// through unchanged and are flagged.
pub(crate) fn extract_images(document: &NodeRef, base: Option<&Url>) -> Vec<DocumentImage> {
    let Ok(img_nodes) = document.select("img") else {
        return Vec::new();
    };

    let mut images = Vec::new();
    for (position, img) in img_nodes.enumerate() {
        let attrs = img.attributes.borrow();

        let Some(raw_src) = IMAGE_SRC_ATTRIBUTES
            .iter()
            .find_map(|attr| attrs.get(*attr))
            .map(str::trim)
            .filter(|src| !src.is_empty())
        else {
            continue;
        };

        let Some(url) = resolve_image_src(base, raw_src) else {
            continue;
        };
        let is_inline_encoded = url.starts_with("data:");

        let alt_text = attrs
            .get("alt")
            .map(collapse_whitespace)
            .filter(|alt| !alt.is_empty())
            .unwrap_or_else(|| format!("Image {}", position + 1));

        images.push(DocumentImage::Unresolved(ImageRef {
            url,
            alt_text,
            width: attrs.get("width").and_then(|w| w.trim().parse().ok()),
            height: attrs.get("height").and_then(|h| h.trim().parse().ok()),
            is_inline_encoded,
        }));
    }

    images
}

/// Catalog every anchor with a resolvable href, de-duplicated by absolute
/// URL; the first occurrence wins, including its text.
pub(crate) fn extract_links(document: &NodeRef, base: Option<&Url>) -> Vec<LinkRef> {
    let Ok(anchor_nodes) = document.select("a[href]") else {
        return Vec::new();
    };

    let mut links = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for anchor in anchor_nodes {
        let href = {
            let attrs = anchor.attributes.borrow();
            attrs.get("href").map(str::to_string)
        };
        let Some(href) = href else { continue };

        let Some(url) = resolve_link_href(base, &href) else {
            continue;
        };

        if !seen.insert(url.clone()) {
            continue;
        }

        let text = collapse_whitespace(&anchor.text_contents());
        let text = if text.is_empty() { url.clone() } else { text };

        links.push(LinkRef { url, text });
    }

    links
}
