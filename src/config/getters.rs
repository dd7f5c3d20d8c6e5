//! Read accessors for `ScrapeConfig`
//!
//! Fields are crate-private; collaborators read them through these getters.

use super::types::ScrapeConfig;
use std::path::Path;
use std::time::Duration;

impl ScrapeConfig {
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    #[must_use]
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    #[must_use]
    pub fn backoff_factor(&self) -> f64 {
        self.backoff_factor
    }

    #[must_use]
    pub fn scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    #[must_use]
    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }

    #[must_use]
    pub fn max_scroll_rounds(&self) -> u32 {
        self.max_scroll_rounds
    }

    #[must_use]
    pub fn disable_images(&self) -> bool {
        self.disable_images
    }

    #[must_use]
    pub fn proxy_address(&self) -> Option<&str> {
        self.proxy_address.as_deref()
    }

    #[must_use]
    pub fn max_images_to_download(&self) -> usize {
        self.max_images_to_download
    }

    #[must_use]
    pub fn asset_concurrency(&self) -> usize {
        self.asset_concurrency
    }

    #[must_use]
    pub fn asset_request_timeout(&self) -> Duration {
        Duration::from_secs(self.asset_request_timeout_secs)
    }

    #[must_use]
    pub fn user_agents(&self) -> &[String] {
        &self.user_agents
    }
}
