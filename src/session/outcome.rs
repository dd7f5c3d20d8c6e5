//! Per-navigation outcome record.

use serde::{Deserialize, Serialize};

use crate::blocking::BlockReason;

/// What happened during one navigation, produced once and then handed to
/// callers unchanged.
///
/// Blocking is advisory: a `blocked == true` outcome still accompanies a
/// best-effort structured document, giving callers the signal the original
/// pipeline only wrote to its log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// A blocking heuristic fired on the loaded page.
    pub blocked: bool,
    /// Human-readable reason ("challenge", "captcha", ...) when blocked.
    pub block_reason: Option<String>,
    /// Navigation attempts performed, including the successful one.
    pub load_attempts: u32,
    /// Post-redirect URL the browser actually settled on.
    pub final_url: String,
}

impl SessionOutcome {
    pub(crate) fn loaded(load_attempts: u32, final_url: String) -> Self {
        Self {
            blocked: false,
            block_reason: None,
            load_attempts,
            final_url,
        }
    }

    /// Derive a new outcome carrying a block verdict.
    #[must_use]
    pub fn with_block(self, reason: &BlockReason) -> Self {
        Self {
            blocked: true,
            block_reason: Some(reason.to_string()),
            ..self
        }
    }
}
