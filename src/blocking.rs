//! Blocking detection heuristics.
//!
//! Classifies a freshly loaded page as blocked or not, without touching it.
//! The verdict is advisory: the pipeline records the reason, waits briefly
//! for late client-side rendering, and proceeds with best-effort extraction —
//! a page that trips a heuristic is often still partially usable.

use std::fmt;

/// Why a page was classified as blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// Browser-verification challenge interstitial (Cloudflare and friends).
    Challenge,
    /// A CAPTCHA is present in the rendered markup.
    Captcha,
    /// Title advertises an access-denied or rate-limit response.
    AccessDenied,
    /// Title looks like a server error page; carries the offending title.
    ErrorPage(String),
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Challenge => write!(f, "challenge"),
            Self::Captcha => write!(f, "captcha"),
            Self::AccessDenied => write!(f, "access-denied"),
            Self::ErrorPage(title) => write!(f, "error-page:{title}"),
        }
    }
}

/// Markup markers of verification-challenge interstitials.
const CHALLENGE_MARKERS: &[&str] = &["cloudflare", "cf-browser-verification"];

/// Markup markers of CAPTCHA widgets.
const CAPTCHA_MARKERS: &[&str] = &["captcha", "recaptcha", "hcaptcha"];

/// Title tokens of access-denial / rate-limiting responses.
const DENIAL_TITLE_TOKENS: &[&str] = &["access denied", "blocked", "403", "429"];

/// Title tokens of generic HTTP error pages.
const ERROR_TITLE_TOKENS: &[&str] = &["error", "404", "500", "502", "503"];

/// Inspect a loaded page and classify it.
///
/// Checks run in priority order: challenge markers beat CAPTCHA markers beat
/// title-based heuristics. Returns `None` when nothing fires.
#[must_use]
pub fn detect(page_title: &str, page_markup: &str) -> Option<BlockReason> {
    let markup = page_markup.to_lowercase();
    let title = page_title.to_lowercase();

    if CHALLENGE_MARKERS.iter().any(|m| markup.contains(m)) {
        return Some(BlockReason::Challenge);
    }
    if CAPTCHA_MARKERS.iter().any(|m| markup.contains(m)) {
        return Some(BlockReason::Captcha);
    }
    if DENIAL_TITLE_TOKENS.iter().any(|t| title.contains(t)) {
        return Some(BlockReason::AccessDenied);
    }
    if ERROR_TITLE_TOKENS.iter().any(|t| title.contains(t)) {
        return Some(BlockReason::ErrorPage(page_title.to_string()));
    }

    None
}
