//! Retry/backoff control flow, modeled as an explicit state machine.
//!
//! Page loads against third-party sites are unreliable: timeouts, transient
//! 5xx, the occasional crashed render process. Both the browser session and
//! the asset retriever drive their retry loops through [`RetryState`] plus
//! the pure [`backoff_delay`] function, which keeps the control flow
//! independently testable without a browser or network.

use std::future::Future;
use std::time::Duration;

/// State of a bounded retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// About to perform attempt `n` (1-based).
    Attempting(u32),
    /// An attempt succeeded; no further attempts happen.
    Succeeded,
    /// All attempts were consumed without success.
    Exhausted,
}

impl RetryState {
    /// Start a loop allowing `max_attempts` attempts.
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        if max_attempts == 0 {
            Self::Exhausted
        } else {
            Self::Attempting(1)
        }
    }

    /// Record a failed attempt, advancing to the next attempt or exhausting.
    #[must_use]
    pub fn failed(self, max_attempts: u32) -> Self {
        match self {
            Self::Attempting(n) if n < max_attempts => Self::Attempting(n + 1),
            Self::Attempting(_) => Self::Exhausted,
            other => other,
        }
    }

    /// Record a successful attempt.
    #[must_use]
    pub fn succeeded(self) -> Self {
        match self {
            Self::Attempting(_) => Self::Succeeded,
            other => other,
        }
    }
}

/// Delay before retrying after attempt `attempt` (1-based):
/// `base * factor^(attempt - 1)`.
#[must_use]
pub fn backoff_delay(base: Duration, factor: f64, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1);
    let scaled = base.as_secs_f64() * factor.max(1.0).powi(exponent as i32);
    Duration::from_secs_f64(scaled)
}

/// Drive a fallible async operation through the retry state machine.
///
/// `op` receives the 1-based attempt number; `should_retry` classifies
/// errors (transient server trouble retries, client errors do not). At
/// least one attempt is always performed. Returns the final result plus
/// the number of attempts actually made so callers can report it.
pub async fn run_with_retry<T, E, F, Fut, P>(
    max_attempts: u32,
    base: Duration,
    factor: f64,
    mut op: F,
    should_retry: P,
) -> (Result<T, E>, u32)
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let max_attempts = max_attempts.max(1);
    let mut state = RetryState::new(max_attempts);
    let mut last_err = None;
    let mut attempts = 0;

    while let RetryState::Attempting(attempt) = state {
        attempts = attempt;
        match op(attempt).await {
            Ok(value) => return (Ok(value), attempts),
            Err(err) => {
                let retryable = should_retry(&err);
                last_err = Some(err);
                if !retryable {
                    break;
                }
                state = state.failed(max_attempts);
                if matches!(state, RetryState::Attempting(_)) {
                    tokio::time::sleep(backoff_delay(base, factor, attempt)).await;
                }
            }
        }
    }

    match last_err {
        Some(err) => (Err(err), attempts),
        None => unreachable!("at least one attempt always runs"),
    }
}
