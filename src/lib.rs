//! pagelift — resilient, anti-detection page extraction.
//!
//! Drives a remote-controlled Chromium session to render a page, survives
//! transient failures and blocking counter-measures, and distills the
//! rendered markup into a [`StructuredDocument`] (title, metadata, body
//! text, tables, images, links) with referenced assets retrieved to disk.
//!
//! ```no_run
//! use pagelift::ScrapeConfig;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ScrapeConfig::builder()
//!     .output_dir("scraped_content")
//!     .build()?;
//!
//! let outcome = pagelift::scrape(&config, "https://example.com").await?;
//! println!("{} links", outcome.document.links.len());
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod blocking;
pub mod browser_profile;
pub mod browser_setup;
pub mod config;
pub mod error;
pub mod extractor;
pub mod interaction;
pub mod pipeline;
pub mod retry;
pub mod session;
pub mod utils;

pub use assets::AssetRetriever;
pub use blocking::{BlockReason, detect as detect_blocking};
pub use config::{ScrapeConfig, ScrapeConfigBuilder};
pub use error::{ScrapeError, ScrapeResult};
pub use extractor::{
    AssetRef, DocumentImage, ImageRef, LinkRef, StructuredDocument, Table, extract,
    extract_at, extract_redirected,
};
pub use pipeline::{ScrapeOutcome, ScrapeStage, scrape_batch, scrape_url};
pub use session::{BrowserSession, SessionOutcome};

/// Scrape a single URL with the given configuration.
///
/// Convenience front door over [`pipeline::scrape_url`].
pub async fn scrape(config: &ScrapeConfig, url: &str) -> ScrapeResult<ScrapeOutcome> {
    pipeline::scrape_url(config, url).await
}
