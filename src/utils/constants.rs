//! Shared configuration constants for pagelift
//!
//! This module contains default values and catalogs used throughout the
//! codebase to ensure consistency and avoid magic numbers.

/// Default pool of browser identity strings used for rotation.
///
/// A fresh identity is drawn uniformly at random for every browser launch and
/// for the asset-retrieval HTTP client, so consecutive sessions never present
/// the same fingerprint. Desktop Chrome/Firefox/Safari builds only; mobile
/// identities tend to trigger different page layouts.
pub const USER_AGENT_POOL: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
];

/// Elements stripped from the DOM before extraction.
///
/// Scripts, styles and page chrome never contribute to the structured
/// document. `meta` and `link` survive the pre-clean because metadata
/// harvesting and title resolution read them afterwards.
pub const UNWANTED_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "noscript", "iframe", "frame",
];

/// Class-attribute tokens that mark noise elements (ads, popups, banners).
///
/// Matched case-insensitively as substrings of the `class` attribute.
pub const NOISE_CLASS_TOKENS: &[&str] = &[
    "advertisement",
    "ad",
    "popup",
    "modal",
    "cookie-banner",
    "social-share",
];

/// Main-content container candidates, in priority order.
///
/// The first selector with a match wins; `body` and finally the whole
/// document act as fallbacks.
pub const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role=\"main\"]",
    "#content",
    ".content",
    "#main",
    ".main",
];

/// File extensions accepted when inferring an image extension from a URL path.
pub const IMAGE_EXTENSION_ALLOWLIST: &[&str] =
    &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp"];

/// Default extension for remote images whose URL carries no recognizable one.
pub const DEFAULT_REMOTE_IMAGE_EXT: &str = "jpg";

/// Default extension for inline-encoded images with an unparseable media type.
pub const DEFAULT_INLINE_IMAGE_EXT: &str = "png";

/// Seconds to poll `document.readyState` after navigation before giving up
/// and treating the attempt as a timeout.
pub const READY_STATE_WAIT_SECS: u64 = 15;

/// Interval between `document.readyState` polls.
pub const READY_STATE_POLL_MS: u64 = 200;

/// Settle delay after a blocking heuristic fires, giving late client-side
/// rendering a chance before best-effort extraction proceeds.
pub const BLOCKED_SETTLE_DELAY_SECS: u64 = 3;

/// Pause after overlay dismissal so banner close animations finish before
/// scrolling starts.
pub const OVERLAY_SETTLE_DELAY_MS: u64 = 1000;

/// Retry attempts per individual asset download.
pub const ASSET_MAX_ATTEMPTS: u32 = 3;

/// Base delay between asset download retries (multiplied by the backoff
/// factor per attempt).
pub const ASSET_RETRY_BASE_DELAY_MS: u64 = 1000;

/// Subdirectory of the output directory where downloaded assets land.
pub const IMAGES_SUBDIR: &str = "images";
