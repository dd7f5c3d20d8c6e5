//! DOM pre-cleaning: strip elements that never contribute content.

use kuchiki::NodeRef;

use crate::utils::constants::{NOISE_CLASS_TOKENS, UNWANTED_TAGS};

/// Remove non-content elements and known noise elements from the tree.
///
/// Noise detection is a case-insensitive substring match on the `class`
/// attribute; "ad" alone therefore also catches "ads", "ad-slot" and
/// similar, which matches how ad markup looks in the wild.
pub(crate) fn strip_noise(document: &NodeRef) {
    for tag in UNWANTED_TAGS {
        detach_all(document, tag);
    }

    let noisy: Vec<NodeRef> = document
        .select("[class]")
        .map(|matches| {
            matches
                .filter(|el| {
                    el.attributes
                        .borrow()
                        .get("class")
                        .map(|classes| {
                            let classes = classes.to_lowercase();
                            NOISE_CLASS_TOKENS.iter().any(|token| classes.contains(token))
                        })
                        .unwrap_or(false)
                })
                .map(|el| el.as_node().clone())
                .collect()
        })
        .unwrap_or_default();

    for node in noisy {
        node.detach();
    }
}

fn detach_all(document: &NodeRef, selector: &str) {
    let nodes: Vec<NodeRef> = document
        .select(selector)
        .map(|matches| matches.map(|el| el.as_node().clone()).collect())
        .unwrap_or_default();

    for node in nodes {
        node.detach();
    }
}
