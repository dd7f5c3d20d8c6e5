//! Asset retrieval: turn a bounded prefix of the image catalog into
//! locally stored files.
//!
//! Individual fetches are independent; they run concurrently up to a
//! bounded worker count and write their results back into index-addressed
//! slots, so the output sequence always preserves catalog order. Per-item
//! failures are recorded and skipped — one broken image never aborts the
//! batch.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::StreamExt;
use futures::stream;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::config::ScrapeConfig;
use crate::extractor::schema::{AssetRef, DocumentImage, ImageRef};
use crate::retry::run_with_retry;
use crate::utils::constants::{
    ASSET_MAX_ATTEMPTS, ASSET_RETRY_BASE_DELAY_MS, DEFAULT_INLINE_IMAGE_EXT,
    DEFAULT_REMOTE_IMAGE_EXT, IMAGE_EXTENSION_ALLOWLIST, IMAGES_SUBDIR,
};

/// Terminal state of one retrieval job.
#[derive(Debug)]
enum JobOutcome {
    Pending,
    Saved(AssetRef),
    Failed(String),
}

/// Ephemeral per-image retrieval state; owned exclusively by the retriever
/// for the duration of a batch and discarded afterwards.
#[derive(Debug)]
struct RetrievalJob {
    index: usize,
    image: ImageRef,
    attempts: u32,
    outcome: JobOutcome,
}

/// Downloads cataloged images into `<output_dir>/images/`.
pub struct AssetRetriever {
    client: reqwest::Client,
    images_dir: PathBuf,
    max_count: usize,
    concurrency: usize,
}

impl AssetRetriever {
    /// Build a retriever from the pipeline configuration.
    ///
    /// The HTTP client carries its own rotated identity, distinct from the
    /// browser session's.
    pub fn new(config: &ScrapeConfig) -> anyhow::Result<Self> {
        let user_agent =
            crate::browser_setup::pick_user_agent(config.user_agents(), &mut rand::rng());

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(config.asset_request_timeout())
            .build()?;

        Ok(Self {
            client,
            images_dir: config.output_dir().join(IMAGES_SUBDIR),
            max_count: config.max_images_to_download(),
            concurrency: config.asset_concurrency(),
        })
    }

    /// Retrieve up to `max_count` images, resolving document slots in place.
    ///
    /// The returned sequence has the same length and order as the input;
    /// items past the cap and failed items stay unresolved. The caller can
    /// diff stored entries against the input length to measure failures.
    pub async fn retrieve(&self, images: Vec<DocumentImage>) -> Vec<DocumentImage> {
        if images.is_empty() || self.max_count == 0 {
            return images;
        }

        if let Err(e) = tokio::fs::create_dir_all(&self.images_dir).await {
            warn!(
                "Could not create images directory {}: {e}",
                self.images_dir.display()
            );
            return images;
        }

        let jobs: Vec<RetrievalJob> = images
            .iter()
            .take(self.max_count)
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.as_unresolved().map(|image| RetrievalJob {
                    index,
                    image: image.clone(),
                    attempts: 0,
                    outcome: JobOutcome::Pending,
                })
            })
            .collect();

        info!(
            "Retrieving {} of {} cataloged image(s)",
            jobs.len(),
            images.len()
        );

        let finished: Vec<RetrievalJob> = stream::iter(jobs)
            .map(|job| self.run_job(job))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        // Index-addressed write-back keeps catalog order regardless of
        // completion order.
        let mut slots = images;
        let mut saved = 0usize;
        let mut failed = 0usize;
        for job in finished {
            match job.outcome {
                JobOutcome::Saved(asset) => {
                    slots[job.index] = DocumentImage::Stored(asset);
                    saved += 1;
                }
                JobOutcome::Failed(reason) => {
                    warn!(
                        "Image {} failed after {} attempt(s): {reason}",
                        job.index + 1,
                        job.attempts
                    );
                    failed += 1;
                }
                JobOutcome::Pending => {}
            }
        }

        info!("Asset retrieval done: {saved} saved, {failed} failed");
        slots
    }

    async fn run_job(&self, mut job: RetrievalJob) -> RetrievalJob {
        let result = if job.image.is_inline_encoded {
            job.attempts = 1;
            self.save_inline(&job.image, job.index).await
        } else {
            let (result, attempts) = run_with_retry(
                ASSET_MAX_ATTEMPTS,
                Duration::from_millis(ASSET_RETRY_BASE_DELAY_MS),
                2.0,
                |_attempt| self.fetch_remote(&job.image, job.index),
                |err: &FetchError| err.retryable,
            )
            .await;
            job.attempts = attempts;
            result.map_err(anyhow::Error::new)
        };

        job.outcome = match result {
            Ok(asset) => JobOutcome::Saved(asset),
            Err(e) => JobOutcome::Failed(format!("{e:#}")),
        };
        job
    }

    /// Decode an inline-encoded payload straight to disk.
    async fn save_inline(&self, image: &ImageRef, index: usize) -> anyhow::Result<AssetRef> {
        let (header, payload) = image
            .url
            .split_once(',')
            .ok_or_else(|| anyhow::anyhow!("malformed data URI"))?;

        let bytes = BASE64
            .decode(payload.trim())
            .map_err(|e| anyhow::anyhow!("base64 decode failed: {e}"))?;

        let ext = extension_from_media_type(header);
        let path = self.item_path(index, ext);
        tokio::fs::write(&path, &bytes).await?;

        Ok(AssetRef {
            local_path: path,
            alt_text: image.alt_text.clone(),
            original_url: image.url.clone(),
        })
    }

    /// One HTTP fetch attempt. Server errors and rate limiting are
    /// retryable; client errors are not worth repeating.
    async fn fetch_remote(&self, image: &ImageRef, index: usize) -> Result<AssetRef, FetchError> {
        let response = self
            .client
            .get(&image.url)
            .send()
            .await
            .map_err(|e| FetchError::retryable(format!("request failed: {e}")))?;

        let status = response.status();
        if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::retryable(format!("server answered {status}")));
        }
        if !status.is_success() {
            return Err(FetchError::fatal(format!("server answered {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::retryable(format!("body read failed: {e}")))?;

        let ext = extension_from_url(&image.url);
        let path = self.item_path(index, ext);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| FetchError::fatal(format!("write failed: {e}")))?;

        Ok(AssetRef {
            local_path: path,
            alt_text: image.alt_text.clone(),
            original_url: image.url.clone(),
        })
    }

    /// Unique per-item filename; index-based so concurrent writers never
    /// collide in the shared output directory.
    fn item_path(&self, index: usize, ext: &str) -> PathBuf {
        self.images_dir.join(format!("image_{}.{ext}", index + 1))
    }

    /// Where this retriever stores assets.
    #[must_use]
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }
}

/// Fetch failure with a retry classification.
#[derive(Debug)]
struct FetchError {
    message: String,
    retryable: bool,
}

impl FetchError {
    fn retryable(message: String) -> Self {
        Self {
            message,
            retryable: true,
        }
    }

    fn fatal(message: String) -> Self {
        Self {
            message,
            retryable: false,
        }
    }
}

impl std::error::Error for FetchError {}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Infer an extension from a data-URI header (`data:image/png;base64`).
fn extension_from_media_type(header: &str) -> &str {
    header
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .and_then(|mime| mime.split('/').next_back())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or(DEFAULT_INLINE_IMAGE_EXT)
}

/// Infer an extension from a URL path against the image allowlist.
fn extension_from_url(url: &str) -> &'static str {
    let ext = Url::parse(url)
        .ok()
        .and_then(|parsed| {
            Path::new(parsed.path())
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
        })
        .unwrap_or_default();

    IMAGE_EXTENSION_ALLOWLIST
        .iter()
        .find(|allowed| **allowed == ext)
        .copied()
        .unwrap_or(DEFAULT_REMOTE_IMAGE_EXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_extension_inference() {
        assert_eq!(extension_from_media_type("data:image/png;base64"), "png");
        assert_eq!(extension_from_media_type("data:image/webp;base64"), "webp");
        assert_eq!(extension_from_media_type("data:;base64"), "png");
        assert_eq!(extension_from_media_type("garbage"), "png");
    }

    #[test]
    fn url_extension_inference() {
        assert_eq!(extension_from_url("https://a.example/x/photo.PNG"), "png");
        assert_eq!(extension_from_url("https://a.example/x/photo.jpeg"), "jpeg");
        assert_eq!(extension_from_url("https://a.example/x/file.exe"), "jpg");
        assert_eq!(extension_from_url("https://a.example/x/noext"), "jpg");
        assert_eq!(extension_from_url("not a url"), "jpg");
    }
}
