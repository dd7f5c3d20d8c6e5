//! Core configuration type for scrape operations
//!
//! This module contains the main `ScrapeConfig` struct that defines every
//! recognized option of the extraction pipeline. Construction goes through
//! the type-safe builder in [`super::builder`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration struct for scrape operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Output directory for downloaded assets and exported reports.
    ///
    /// **INVARIANT:** Always an absolute path (normalized in builder).
    pub(crate) output_dir: PathBuf,

    /// Run the browser without a visible window.
    pub(crate) headless: bool,

    /// Timeout in seconds for a single `page.goto()` attempt.
    pub(crate) page_load_timeout_secs: u64,

    /// Maximum navigation attempts per URL (first attempt included).
    pub(crate) max_retries: u32,

    /// Base delay in milliseconds before the first navigation retry.
    pub(crate) retry_base_delay_ms: u64,

    /// Multiplier applied to the retry delay per failed attempt.
    pub(crate) backoff_factor: f64,

    /// Trigger progressive scroll to materialize lazy-loaded content.
    pub(crate) scroll_enabled: bool,

    /// Pause in milliseconds between scroll rounds.
    pub(crate) scroll_pause_ms: u64,

    /// Upper bound on scroll rounds; guarantees termination against
    /// infinite-scroll pages.
    pub(crate) max_scroll_rounds: u32,

    /// Ask the browser not to load images (bandwidth saver; downloaded
    /// assets still come from the extracted catalog over HTTP).
    pub(crate) disable_images: bool,

    /// Optional proxy in `host:port` or scheme-prefixed form.
    pub(crate) proxy_address: Option<String>,

    /// Cap on how many cataloged images the asset retriever fetches.
    pub(crate) max_images_to_download: usize,

    /// Concurrent asset downloads within one document.
    pub(crate) asset_concurrency: usize,

    /// Per-request timeout in seconds for asset downloads.
    pub(crate) asset_request_timeout_secs: u64,

    /// Identity pool for rotation; one entry is drawn per browser launch.
    pub(crate) user_agents: Vec<String>,
}
