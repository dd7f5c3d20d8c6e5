//! Chrome profile directory management
//!
//! Every browser launch gets a UUID-named profile directory so concurrent
//! sessions never fight over Chrome's SingletonLock. The RAII wrapper cleans
//! the directory up unless ownership is transferred to the session teardown.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

const PROFILE_PREFIX: &str = "pagelift_chrome";

/// RAII wrapper for a Chrome profile directory.
///
/// Removes the directory on drop unless `into_path()` transferred ownership
/// to another cleanup mechanism (the session teardown path).
#[derive(Debug)]
pub struct BrowserProfile {
    path: PathBuf,
    cleanup_on_drop: bool,
}

impl BrowserProfile {
    /// Get reference to the profile directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the profile and return the path, disabling auto-cleanup.
    pub fn into_path(mut self) -> PathBuf {
        self.cleanup_on_drop = false;
        std::mem::take(&mut self.path)
    }
}

impl Drop for BrowserProfile {
    fn drop(&mut self) {
        if self.cleanup_on_drop && self.path.exists() {
            debug!("BrowserProfile cleanup: removing {}", self.path.display());
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                warn!(
                    "Failed to clean up profile directory {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

/// Create a unique Chrome profile directory using UUID v4.
///
/// Uses `create_dir` (not `create_dir_all`) for atomic creation; a collision
/// on an existing directory fails instead of silently reusing it.
pub fn create_unique_profile() -> Result<BrowserProfile> {
    let path = std::env::temp_dir().join(format!("{PROFILE_PREFIX}_{}", Uuid::new_v4()));

    std::fs::create_dir(&path)
        .with_context(|| format!("Failed to create profile directory: {}", path.display()))?;

    debug!("Created Chrome profile directory: {}", path.display());
    Ok(BrowserProfile {
        path,
        cleanup_on_drop: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_an_armed_profile_removes_the_directory() {
        let profile = create_unique_profile().expect("profile creation");
        let path = profile.path().to_path_buf();
        assert!(path.is_dir());

        drop(profile);
        assert!(!path.exists(), "directory should be gone after drop");
    }

    #[test]
    fn into_path_transfers_cleanup_responsibility() {
        let profile = create_unique_profile().expect("profile creation");
        let path = profile.into_path();
        assert!(path.is_dir(), "directory must survive ownership transfer");

        std::fs::remove_dir_all(&path).expect("manual cleanup");
    }
}
