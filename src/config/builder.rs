//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! The builder refuses to `build()` until the output directory is set,
//! enforced at compile time rather than with a runtime check.

use anyhow::{Result, anyhow};
use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::ScrapeConfig;
use crate::utils::constants::USER_AGENT_POOL;

// Type states for the builder
pub struct WithOutputDir;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) output_dir: Option<PathBuf>,
    pub(crate) headless: bool,
    pub(crate) page_load_timeout_secs: u64,
    pub(crate) max_retries: u32,
    pub(crate) retry_base_delay_ms: u64,
    pub(crate) backoff_factor: f64,
    pub(crate) scroll_enabled: bool,
    pub(crate) scroll_pause_ms: u64,
    pub(crate) max_scroll_rounds: u32,
    pub(crate) disable_images: bool,
    pub(crate) proxy_address: Option<String>,
    pub(crate) max_images_to_download: usize,
    pub(crate) asset_concurrency: usize,
    pub(crate) asset_request_timeout_secs: u64,
    pub(crate) user_agents: Vec<String>,
    pub(crate) _state: PhantomData<State>,
}

impl ScrapeConfig {
    /// Start building a configuration. `output_dir` is required.
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder {
            output_dir: None,
            headless: true,
            page_load_timeout_secs: 30,
            max_retries: 3,
            retry_base_delay_ms: 2000,
            backoff_factor: 2.0,
            scroll_enabled: true,
            scroll_pause_ms: 2000,
            max_scroll_rounds: 10,
            disable_images: false,
            proxy_address: None,
            max_images_to_download: 50,
            asset_concurrency: 4,
            asset_request_timeout_secs: 10,
            user_agents: USER_AGENT_POOL.iter().map(|ua| ua.to_string()).collect(),
            _state: PhantomData,
        }
    }
}

impl ScrapeConfigBuilder<()> {
    /// Set the output directory, unlocking `build()`.
    #[must_use]
    pub fn output_dir(self, dir: impl Into<PathBuf>) -> ScrapeConfigBuilder<WithOutputDir> {
        ScrapeConfigBuilder {
            output_dir: Some(dir.into()),
            headless: self.headless,
            page_load_timeout_secs: self.page_load_timeout_secs,
            max_retries: self.max_retries,
            retry_base_delay_ms: self.retry_base_delay_ms,
            backoff_factor: self.backoff_factor,
            scroll_enabled: self.scroll_enabled,
            scroll_pause_ms: self.scroll_pause_ms,
            max_scroll_rounds: self.max_scroll_rounds,
            disable_images: self.disable_images,
            proxy_address: self.proxy_address,
            max_images_to_download: self.max_images_to_download,
            asset_concurrency: self.asset_concurrency,
            asset_request_timeout_secs: self.asset_request_timeout_secs,
            user_agents: self.user_agents,
            _state: PhantomData,
        }
    }
}

impl<State> ScrapeConfigBuilder<State> {
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn page_load_timeout_secs(mut self, secs: u64) -> Self {
        self.page_load_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    #[must_use]
    pub fn retry_base_delay_ms(mut self, ms: u64) -> Self {
        self.retry_base_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn backoff_factor(mut self, factor: f64) -> Self {
        self.backoff_factor = factor;
        self
    }

    #[must_use]
    pub fn scroll_enabled(mut self, enabled: bool) -> Self {
        self.scroll_enabled = enabled;
        self
    }

    #[must_use]
    pub fn scroll_pause_ms(mut self, ms: u64) -> Self {
        self.scroll_pause_ms = ms;
        self
    }

    #[must_use]
    pub fn max_scroll_rounds(mut self, rounds: u32) -> Self {
        self.max_scroll_rounds = rounds;
        self
    }

    #[must_use]
    pub fn disable_images(mut self, disable: bool) -> Self {
        self.disable_images = disable;
        self
    }

    #[must_use]
    pub fn proxy_address(mut self, proxy: Option<String>) -> Self {
        self.proxy_address = proxy;
        self
    }

    #[must_use]
    pub fn max_images_to_download(mut self, max: usize) -> Self {
        self.max_images_to_download = max;
        self
    }

    #[must_use]
    pub fn asset_concurrency(mut self, workers: usize) -> Self {
        self.asset_concurrency = workers;
        self
    }

    #[must_use]
    pub fn asset_request_timeout_secs(mut self, secs: u64) -> Self {
        self.asset_request_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn user_agents(mut self, pool: Vec<String>) -> Self {
        self.user_agents = pool;
        self
    }
}

impl ScrapeConfigBuilder<WithOutputDir> {
    /// Validate and produce the final configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty identity pool, a backoff factor below
    /// 1.0, or zero navigation attempts.
    pub fn build(self) -> Result<ScrapeConfig> {
        let output_dir = self
            .output_dir
            .ok_or_else(|| anyhow!("output_dir missing despite typestate"))?;

        if self.user_agents.is_empty() {
            return Err(anyhow!("user agent pool must not be empty"));
        }
        if self.backoff_factor < 1.0 {
            return Err(anyhow!(
                "backoff factor must be >= 1.0, got {}",
                self.backoff_factor
            ));
        }
        if self.max_retries == 0 {
            return Err(anyhow!("max_retries must be at least 1"));
        }

        // Normalize to an absolute path so downstream path math is stable
        // regardless of the caller's working directory.
        let output_dir = if output_dir.is_absolute() {
            output_dir
        } else {
            std::env::current_dir()?.join(output_dir)
        };

        Ok(ScrapeConfig {
            output_dir,
            headless: self.headless,
            page_load_timeout_secs: self.page_load_timeout_secs,
            max_retries: self.max_retries,
            retry_base_delay_ms: self.retry_base_delay_ms,
            backoff_factor: self.backoff_factor,
            scroll_enabled: self.scroll_enabled,
            scroll_pause_ms: self.scroll_pause_ms,
            max_scroll_rounds: self.max_scroll_rounds,
            disable_images: self.disable_images,
            proxy_address: self.proxy_address,
            max_images_to_download: self.max_images_to_download,
            asset_concurrency: self.asset_concurrency.max(1),
            asset_request_timeout_secs: self.asset_request_timeout_secs,
            user_agents: self.user_agents,
        })
    }
}
