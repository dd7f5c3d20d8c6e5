//! Retry state machine and backoff schedule.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use pagelift::retry::{RetryState, backoff_delay, run_with_retry};

#[test]
fn state_machine_walks_attempts_then_exhausts() {
    let max = 3;
    let state = RetryState::new(max);
    assert_eq!(state, RetryState::Attempting(1));

    let state = state.failed(max);
    assert_eq!(state, RetryState::Attempting(2));

    let state = state.failed(max);
    assert_eq!(state, RetryState::Attempting(3));

    let state = state.failed(max);
    assert_eq!(state, RetryState::Exhausted);

    // Terminal states are absorbing
    assert_eq!(state.failed(max), RetryState::Exhausted);
    assert_eq!(state.succeeded(), RetryState::Exhausted);
}

#[test]
fn success_is_terminal() {
    let state = RetryState::new(3).succeeded();
    assert_eq!(state, RetryState::Succeeded);
    assert_eq!(state.failed(3), RetryState::Succeeded);
}

#[test]
fn zero_budget_starts_exhausted() {
    assert_eq!(RetryState::new(0), RetryState::Exhausted);
}

#[test]
fn backoff_doubles_from_the_base() {
    let base = Duration::from_secs(2);
    assert_eq!(backoff_delay(base, 2.0, 1), Duration::from_secs(2));
    assert_eq!(backoff_delay(base, 2.0, 2), Duration::from_secs(4));
    assert_eq!(backoff_delay(base, 2.0, 3), Duration::from_secs(8));
}

#[test]
fn backoff_factor_below_one_is_clamped() {
    let base = Duration::from_millis(100);
    assert_eq!(backoff_delay(base, 0.5, 3), base);
}

#[tokio::test]
async fn transient_failures_retry_until_success() {
    let calls = AtomicU32::new(0);

    let (result, attempts) = run_with_retry(
        3,
        Duration::from_millis(1),
        2.0,
        |attempt| {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            assert_eq!(attempt, n, "1-based attempt number mismatch");
            async move {
                if n < 3 { Err("transient") } else { Ok("done") }
            }
        },
        |_err| true,
    )
    .await;

    assert_eq!(result, Ok("done"));
    assert_eq!(attempts, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn exhaustion_returns_the_last_error() {
    let calls = AtomicU32::new(0);

    let (result, attempts) = run_with_retry(
        3,
        Duration::from_millis(1),
        2.0,
        |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Err::<(), String>(format!("boom {attempt}")) }
        },
        |_err| true,
    )
    .await;

    assert_eq!(result, Err("boom 3".to_string()));
    assert_eq!(attempts, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn non_retryable_errors_stop_immediately() {
    let calls = AtomicU32::new(0);

    let (result, attempts) = run_with_retry(
        5,
        Duration::from_millis(1),
        2.0,
        |_attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), &str>("fatal") }
        },
        |_err| false,
    )
    .await;

    assert_eq!(result, Err("fatal"));
    assert_eq!(attempts, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn first_try_success_makes_one_attempt() {
    let (result, attempts) = run_with_retry(
        3,
        Duration::from_millis(1),
        2.0,
        |_attempt| async { Ok::<_, &str>(42) },
        |_err| true,
    )
    .await;

    assert_eq!(result, Ok(42));
    assert_eq!(attempts, 1);
}

#[tokio::test]
async fn zero_attempt_budget_still_runs_once() {
    let (result, attempts) = run_with_retry(
        0,
        Duration::from_millis(1),
        2.0,
        |_attempt| async { Ok::<_, &str>(()) },
        |_err| true,
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(attempts, 1);
}
