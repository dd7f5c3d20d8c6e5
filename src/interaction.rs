//! Interaction driving: make hidden and lazy content visible before
//! extraction.
//!
//! Overlay dismissal walks a fixed catalog of selector intents and clicks
//! every currently visible match; absence of a match is normal, not an
//! error. Progressive scrolling forces lazy-loaded content to materialize
//! and is bounded so infinite-scroll pages cannot stall the pipeline.

use chromiumoxide::Page;
use log::{debug, info};
use std::time::Duration;

/// A declarative "find and act" intent: what an overlay control is for,
/// and the selector that finds it.
#[derive(Debug, Clone, Copy)]
pub struct OverlayRule {
    pub purpose: &'static str,
    pub selector: &'static str,
}

/// Catalog of common close/accept controls for cookie banners, GDPR
/// prompts and modals. Evaluated in order; every rule is best-effort.
pub const OVERLAY_RULES: &[OverlayRule] = &[
    OverlayRule {
        purpose: "generic close button",
        selector: "button[class*=\"close\"]",
    },
    OverlayRule {
        purpose: "generic dismiss button",
        selector: "button[class*=\"dismiss\"]",
    },
    OverlayRule {
        purpose: "labelled close button",
        selector: "button[aria-label*=\"close\" i]",
    },
    OverlayRule {
        purpose: "cookie accept button",
        selector: "[class*=\"cookie\"] button[class*=\"accept\"]",
    },
    OverlayRule {
        purpose: "cookie agree button",
        selector: "[class*=\"cookie\"] button[class*=\"agree\"]",
    },
    OverlayRule {
        purpose: "cookie banner button",
        selector: "[id*=\"cookie\"] button",
    },
    OverlayRule {
        purpose: "gdpr prompt button",
        selector: "[class*=\"gdpr\"] button",
    },
    OverlayRule {
        purpose: "close link",
        selector: "a[class*=\"close\"]",
    },
    OverlayRule {
        purpose: "modal close control",
        selector: ".modal-close",
    },
    OverlayRule {
        purpose: "popup close control",
        selector: ".popup-close",
    },
];

/// Click every visible element matching the overlay catalog.
///
/// Selector failures and missing matches are tolerated silently; returns
/// how many elements were clicked, for telemetry only.
pub async fn dismiss_overlays(page: &Page) -> usize {
    let mut clicked_total = 0usize;

    for rule in OVERLAY_RULES {
        let selector_json = match serde_json::to_string(rule.selector) {
            Ok(s) => s,
            Err(_) => continue,
        };

        // offsetParent filters out hidden elements; click count comes back
        // so the caller can pause only when something actually closed.
        let script = format!(
            r"(function() {{
                let clicked = 0;
                try {{
                    document.querySelectorAll({selector_json}).forEach((el) => {{
                        if (el.offsetParent !== null) {{
                            el.click();
                            clicked += 1;
                        }}
                    }});
                }} catch (e) {{}}
                return clicked;
            }})()"
        );

        match page.evaluate(script.as_str()).await {
            Ok(result) => {
                let clicked = result.into_value::<u64>().unwrap_or(0) as usize;
                if clicked > 0 {
                    info!("Dismissed {clicked} overlay(s): {}", rule.purpose);
                    clicked_total += clicked;
                    tokio::time::sleep(Duration::from_millis(500)).await;
                }
            }
            Err(e) => {
                debug!("Overlay rule '{}' failed: {e}", rule.purpose);
            }
        }
    }

    clicked_total
}

/// Scroll to the document bottom repeatedly until the height stops growing
/// or `max_rounds` is reached, then return to the top.
///
/// Returns the number of scroll rounds performed.
pub async fn scroll_to_bottom(page: &Page, pause: Duration, max_rounds: u32) -> u32 {
    info!("Scrolling to force lazy-loaded content");

    let mut last_height = match document_height(page).await {
        Some(h) => h,
        None => {
            debug!("Could not read document height, skipping scroll");
            return 0;
        }
    };

    let mut rounds = 0u32;
    while rounds < max_rounds {
        if page
            .evaluate("window.scrollTo(0, document.body.scrollHeight);")
            .await
            .is_err()
        {
            break;
        }
        tokio::time::sleep(pause).await;

        let new_height = match document_height(page).await {
            Some(h) => h,
            None => break,
        };
        if new_height == last_height {
            // No growth: nothing left to lazy-load
            break;
        }
        last_height = new_height;
        rounds += 1;
    }

    // Hand control back with the viewport at the top
    let _ = page.evaluate("window.scrollTo(0, 0);").await;
    tokio::time::sleep(Duration::from_millis(500)).await;

    info!("Scroll finished after {rounds} round(s)");
    rounds
}

async fn document_height(page: &Page) -> Option<u64> {
    page.evaluate("document.body.scrollHeight")
        .await
        .ok()
        .and_then(|result| result.into_value::<u64>().ok())
}
