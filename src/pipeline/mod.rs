//! Pipeline orchestration: sequence session, detection, interaction,
//! extraction and asset retrieval for one URL, and fan out over batches.
//!
//! The per-URL pipeline is strictly sequential — every stage depends on the
//! rendered state its predecessor produced. A batch of URLs is
//! embarrassingly parallel: each scrape owns its own browser session, so
//! pipelines run concurrently bounded only by a worker cap on simultaneous
//! browser processes.

use futures::StreamExt;
use futures::stream;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{info, warn};

use crate::assets::AssetRetriever;
use crate::blocking;
use crate::config::ScrapeConfig;
use crate::error::{ScrapeError, ScrapeResult};
use crate::extractor;
use crate::extractor::StructuredDocument;
use crate::interaction;
use crate::session::{BrowserSession, SessionOutcome};
use crate::utils::constants::{BLOCKED_SETTLE_DELAY_SECS, OVERLAY_SETTLE_DELAY_MS};
use crate::utils::url_utils::normalize_input_url;

/// Stages of one scrape invocation, in order. `Failed` is terminal;
/// blocking detection never fails the pipeline, it only annotates the
/// session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeStage {
    Created,
    SessionOpen,
    Navigated,
    BlockCheck,
    Interacted,
    Extracted,
    AssetsResolved,
    Done,
    Failed,
}

impl fmt::Display for ScrapeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::SessionOpen => "session-open",
            Self::Navigated => "navigated",
            Self::BlockCheck => "block-check",
            Self::Interacted => "interacted",
            Self::Extracted => "extracted",
            Self::AssetsResolved => "assets-resolved",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Result of one successful scrape: the structured document plus the
/// session record, including the advisory blocking verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    pub document: StructuredDocument,
    pub session: SessionOutcome,
}

/// Scrape a single URL through the full pipeline.
///
/// Session teardown is guaranteed on every exit path; this function is the
/// only place `close()` is called.
///
/// # Errors
///
/// [`ScrapeError::InvalidUrl`] for unusable input, [`ScrapeError::Launch`]
/// when the browser cannot start, [`ScrapeError::Navigation`] when all load
/// attempts are exhausted.
pub async fn scrape_url(config: &ScrapeConfig, url: &str) -> ScrapeResult<ScrapeOutcome> {
    let url =
        normalize_input_url(url).ok_or_else(|| ScrapeError::InvalidUrl(url.to_string()))?;

    info!(stage = %ScrapeStage::Created, url, "scrape starting");

    let mut session = match BrowserSession::open(config).await {
        Ok(session) => session,
        Err(e) => {
            warn!(stage = %ScrapeStage::Failed, url, error = %e, "browser launch failed");
            return Err(e);
        }
    };
    info!(stage = %ScrapeStage::SessionOpen, url, "browser session open");

    let result = run_stages(&mut session, config, &url).await;

    // Teardown runs regardless of how the stages ended.
    session.close().await;

    match &result {
        Ok(outcome) => info!(
            stage = %ScrapeStage::Done,
            url,
            blocked = outcome.session.blocked,
            attempts = outcome.session.load_attempts,
            "scrape finished"
        ),
        Err(e) => warn!(stage = %ScrapeStage::Failed, url, error = %e, "scrape failed"),
    }

    result
}

async fn run_stages(
    session: &mut BrowserSession,
    config: &ScrapeConfig,
    url: &str,
) -> ScrapeResult<ScrapeOutcome> {
    let mut outcome = session.navigate(url).await?;
    info!(
        stage = %ScrapeStage::Navigated,
        url,
        attempts = outcome.load_attempts,
        final_url = %outcome.final_url,
        "page loaded"
    );

    // Blocking detection is advisory: record it, give late client-side
    // rendering a moment, keep going on a best-effort basis.
    let title = session.page_title().await.unwrap_or_default();
    let markup = session.current_markup().await?;
    if let Some(reason) = blocking::detect(&title, &markup) {
        warn!(stage = %ScrapeStage::BlockCheck, url, reason = %reason, "blocking detected");
        outcome = outcome.with_block(&reason);
        tokio::time::sleep(Duration::from_secs(BLOCKED_SETTLE_DELAY_SECS)).await;
    } else {
        info!(stage = %ScrapeStage::BlockCheck, url, "no blocking detected");
    }

    let page = session.page()?;
    let dismissed = interaction::dismiss_overlays(page).await;
    if dismissed > 0 {
        tokio::time::sleep(Duration::from_millis(OVERLAY_SETTLE_DELAY_MS)).await;
    }
    if config.scroll_enabled() {
        interaction::scroll_to_bottom(page, config.scroll_pause(), config.max_scroll_rounds())
            .await;
    }
    info!(stage = %ScrapeStage::Interacted, url, dismissed, "interaction complete");

    // Re-read the markup: overlays and scrolling changed the DOM. The
    // document keeps the requested URL as its source; relative URLs resolve
    // against wherever redirects actually landed.
    let markup = session.current_markup().await?;
    let mut document = extractor::extract_redirected(&markup, url, &outcome.final_url);
    info!(
        stage = %ScrapeStage::Extracted,
        url,
        tables = document.tables.len(),
        images = document.images.len(),
        links = document.links.len(),
        "content extracted"
    );

    if config.max_images_to_download() > 0 && !document.images.is_empty() {
        let retriever = AssetRetriever::new(config)?;
        document.images = retriever.retrieve(document.images).await;
    }
    info!(stage = %ScrapeStage::AssetsResolved, url, "assets resolved");

    Ok(ScrapeOutcome {
        document,
        session: outcome,
    })
}

/// Scrape a batch of URLs as concurrent pipeline instances.
///
/// Bounded by `max_concurrent` simultaneous browser processes. Failures are
/// isolated per URL; results come back in input order.
pub async fn scrape_batch(
    config: &ScrapeConfig,
    urls: &[String],
    max_concurrent: usize,
) -> Vec<ScrapeResult<ScrapeOutcome>> {
    let max_concurrent = max_concurrent.max(1);

    let mut indexed: Vec<(usize, ScrapeResult<ScrapeOutcome>)> =
        stream::iter(urls.iter().enumerate())
            .map(|(index, url)| async move { (index, scrape_url(config, url).await) })
            .buffer_unordered(max_concurrent)
            .collect()
            .await;

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, result)| result).collect()
}
