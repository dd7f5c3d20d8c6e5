//! Browser session lifecycle: launch, navigation with retry, teardown.
//!
//! One `BrowserSession` owns exactly one Chrome process end to end. Page
//! loads against third-party sites fail in transient ways (timeouts, 5xx,
//! crashed render processes), so navigation retries with exponential backoff;
//! when the process itself becomes unusable the session relaunches before
//! the next attempt.

mod outcome;

pub use outcome::SessionOutcome;

use chromiumoxide::Page;
use chromiumoxide::browser::Browser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::browser_profile::create_unique_profile;
use crate::browser_setup::{apply_identity_override, launch_browser, pick_user_agent};
use crate::config::ScrapeConfig;
use crate::error::{ScrapeError, ScrapeResult};
use crate::retry::{RetryState, backoff_delay};
use crate::utils::constants::{READY_STATE_POLL_MS, READY_STATE_WAIT_SECS};

/// Live browser process plus its CDP handler task.
struct SessionInner {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    user_data_dir: PathBuf,
}

/// A controllable browser instance used to fetch and render URLs.
pub struct BrowserSession {
    config: ScrapeConfig,
    user_agent: String,
    inner: Option<SessionInner>,
}

impl BrowserSession {
    /// Launch a browser with a rotated identity and stealth configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Launch`] when the process cannot be started.
    pub async fn open(config: &ScrapeConfig) -> ScrapeResult<Self> {
        let user_agent =
            pick_user_agent(config.user_agents(), &mut rand::rng()).to_string();
        info!("Browser identity: {user_agent}");

        let mut session = Self {
            config: config.clone(),
            user_agent,
            inner: None,
        };
        session
            .launch()
            .await
            .map_err(|e| ScrapeError::Launch(format!("{e:#}")))?;
        Ok(session)
    }

    async fn launch(&mut self) -> anyhow::Result<()> {
        // The profile guard stays armed until the session is fully up; a
        // failed launch drops it and removes the directory.
        let profile = create_unique_profile()?;

        let (browser, handler) =
            launch_browser(&self.config, &self.user_agent, profile.path().to_path_buf()).await?;

        let page = browser.new_page("about:blank").await?;
        if let Err(e) = apply_identity_override(&page, &self.user_agent).await {
            // Identity override is best-effort; a page that rejects the
            // script still renders.
            warn!("Identity override failed: {e:#}");
        }

        self.inner = Some(SessionInner {
            browser,
            handler,
            page,
            user_data_dir: profile.into_path(),
        });
        Ok(())
    }

    /// Navigate to `url`, waiting for the document to signal readiness.
    ///
    /// Retries up to the configured attempt budget with exponential backoff.
    /// A dead browser process is torn down and relaunched between attempts.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Navigation`] once all attempts are exhausted
    /// or a required relaunch fails.
    pub async fn navigate(&mut self, url: &str) -> ScrapeResult<SessionOutcome> {
        let max_attempts = self.config.max_retries();
        let base = self.config.retry_base_delay();
        let factor = self.config.backoff_factor();

        let mut state = RetryState::new(max_attempts);
        let mut last_reason = String::from("no attempts performed");

        while let RetryState::Attempting(attempt) = state {
            info!("Attempt {attempt}/{max_attempts}: loading {url}");

            match self.try_load(url).await {
                Ok(final_url) => {
                    info!("Page loaded on attempt {attempt}: {final_url}");
                    return Ok(SessionOutcome::loaded(attempt, final_url));
                }
                Err(e) => {
                    last_reason = format!("{e:#}");
                    warn!("Load attempt {attempt} failed for {url}: {last_reason}");
                    state = state.failed(max_attempts);

                    if matches!(state, RetryState::Attempting(_)) {
                        tokio::time::sleep(backoff_delay(base, factor, attempt)).await;

                        if session_is_dead(&last_reason) {
                            info!("Browser session unusable, relaunching");
                            self.close().await;
                            if let Err(relaunch_err) = self.launch().await {
                                return Err(ScrapeError::Navigation {
                                    url: url.to_string(),
                                    attempts: max_attempts,
                                    reason: format!(
                                        "relaunch failed after dead session: {relaunch_err:#}"
                                    ),
                                });
                            }
                        }
                    }
                }
            }
        }

        Err(ScrapeError::Navigation {
            url: url.to_string(),
            attempts: max_attempts,
            reason: last_reason,
        })
    }

    /// One load attempt: `goto` bounded by the page-load timeout, then a
    /// readiness poll on `document.readyState`.
    async fn try_load(&mut self, url: &str) -> anyhow::Result<String> {
        let page = self.page()?;

        tokio::time::timeout(self.config.page_load_timeout(), page.goto(url))
            .await
            .map_err(|_| anyhow::anyhow!("page load timed out"))?
            .map_err(|e| anyhow::anyhow!("navigation failed: {e}"))?;

        self.wait_until_ready().await?;

        let page = self.page()?;
        let final_url = page
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| url.to_string());
        Ok(final_url)
    }

    /// Poll until `document.readyState === "complete"`.
    ///
    /// `wait_for_navigation` returns when the HTTP response arrives, which is
    /// too early for script-rendered pages; readiness is what the extractor
    /// actually depends on.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        let start = Instant::now();
        let max_wait = Duration::from_secs(READY_STATE_WAIT_SECS);
        let poll_interval = Duration::from_millis(READY_STATE_POLL_MS);

        loop {
            let page = self.page()?;
            match page.evaluate("document.readyState").await {
                Ok(result) => {
                    let ready_state: Option<String> = result.into_value().ok();
                    if ready_state.as_deref() == Some("complete") {
                        debug!(
                            "Page ready after {:.2}s",
                            start.elapsed().as_secs_f64()
                        );
                        return Ok(());
                    }
                }
                Err(e) => {
                    debug!("readyState check failed, retrying: {e}");
                }
            }

            if start.elapsed() >= max_wait {
                return Err(anyhow::anyhow!(
                    "timed out waiting for document readiness after {READY_STATE_WAIT_SECS}s"
                ));
            }
            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Title of the currently loaded document.
    pub async fn page_title(&self) -> ScrapeResult<String> {
        let page = self.page()?;
        let result = page
            .evaluate("document.title")
            .await
            .map_err(|e| ScrapeError::Other(format!("title read failed: {e}")))?;
        Ok(result.into_value::<String>().unwrap_or_default())
    }

    /// Full rendered markup of the currently loaded document.
    pub async fn current_markup(&self) -> ScrapeResult<String> {
        let page = self.page()?;
        page.content()
            .await
            .map_err(|e| ScrapeError::Other(format!("markup read failed: {e}")))
    }

    /// The live page, for interaction driving.
    pub fn page(&self) -> ScrapeResult<&Page> {
        self.inner
            .as_ref()
            .map(|inner| &inner.page)
            .ok_or_else(|| ScrapeError::Other("browser session is closed".to_string()))
    }

    /// Tear the session down. Idempotent; safe on every exit path.
    pub async fn close(&mut self) {
        let Some(mut inner) = self.inner.take() else {
            return;
        };

        if let Err(e) = inner.browser.close().await {
            warn!("Browser close failed: {e}");
        }
        if let Err(e) = inner.browser.wait().await {
            debug!("Browser wait after close failed: {e}");
        }
        inner.handler.abort();

        if let Err(e) = std::fs::remove_dir_all(&inner.user_data_dir) {
            warn!(
                "Failed to remove profile directory {}: {}",
                inner.user_data_dir.display(),
                e
            );
        }
        info!("Browser session closed");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Fallback when close() was not reached; Browser::drop kills the
        // process, we only stop the handler and drop the profile dir.
        if let Some(inner) = self.inner.take() {
            warn!("BrowserSession dropped without explicit close()");
            inner.handler.abort();
            let _ = std::fs::remove_dir_all(&inner.user_data_dir);
        }
    }
}

/// Heuristic for browser-process death based on the error text.
///
/// Matches the failure modes where further navigation on the same process
/// cannot succeed (closed websocket, dropped CDP channel, killed target).
fn session_is_dead(reason: &str) -> bool {
    let reason = reason.to_lowercase();
    ["session closed", "connection closed", "channel", "disconnected", "browser session is closed"]
        .iter()
        .any(|marker| reason.contains(marker))
}
