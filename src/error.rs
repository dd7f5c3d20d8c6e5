//! Error taxonomy for scrape operations.
//!
//! Fatal errors (`Launch`, `Navigation`) abort a single URL's pipeline;
//! everything below that level degrades in place: blocking detection is
//! advisory, extraction sub-fields default to empty values, and per-asset
//! download failures are counted but never surface here.

use thiserror::Error;

/// Fatal failures of a single scrape invocation.
///
/// A multi-URL batch isolates these per URL; one failed URL never takes the
/// batch down.
#[derive(Debug, Clone, Error)]
pub enum ScrapeError {
    /// The requested URL could not be normalized into a valid http(s) URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The browser process could not be started.
    #[error("browser launch failed: {0}")]
    Launch(String),

    /// All navigation attempts were exhausted.
    #[error("navigation to {url} failed after {attempts} attempt(s): {reason}")]
    Navigation {
        url: String,
        attempts: u32,
        reason: String,
    },

    /// Anything else (browser communication, filesystem, ...).
    #[error("scrape error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} preserves the full context chain
        Self::Other(format!("{err:#}"))
    }
}

/// Convenience alias for results carrying a [`ScrapeError`].
pub type ScrapeResult<T> = Result<T, ScrapeError>;
