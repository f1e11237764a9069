//! Bounded polling for conditions that hold eventually.
//!
//! One engine serves element waits and document waits. The condition check
//! runs once per poll; between polls the engine sleeps for the poll interval,
//! clamped to the time left before the deadline.
//!
//! | Check result | Engine |
//! |--------------|--------|
//! | `Ok(Poll::Ready(v))` | returns `v` |
//! | `Ok(Poll::Pending)` | sleeps, polls again |
//! | `Err(e)` with `e.is_retryable_during_wait()` | sleeps, polls again |
//! | `Err(e)` otherwise | returns `e` at once |
//!
//! When the deadline passes the caller gets `None` and turns it into
//! [`Error::WaitTimeout`](crate::Error::WaitTimeout) with whatever
//! diagnostics it can still collect.

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::trace;

use crate::error::Result;

// ============================================================================
// Constants
// ============================================================================

/// Default time budget of a wait (30 seconds).
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default pause between two polls (200 milliseconds).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

// ============================================================================
// WaitOptions
// ============================================================================

/// Time budget and poll interval of a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaitOptions {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

// ============================================================================
// Conditions
// ============================================================================

/// What an element wait waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementCondition {
    /// The element exists.
    #[default]
    Presence,
    /// The element exists and is enabled.
    Enabled,
}

impl ElementCondition {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            Self::Presence => "element presence",
            Self::Enabled => "element enabled",
        }
    }
}

/// What a document wait waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocumentCondition {
    /// `readyState` is `complete`.
    #[default]
    Ready,
    /// `readyState` is `interactive` or `complete`.
    Interactive,
}

impl DocumentCondition {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            Self::Ready => "document ready",
            Self::Interactive => "document interactive",
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Outcome of one condition check.
#[derive(Debug)]
pub(crate) enum Poll<T> {
    Ready(T),
    Pending,
}

/// Polls `check` until it is ready, fails terminally, or time runs out.
///
/// Returns `Ok(None)` on timeout. The first check runs before any sleep, so
/// a condition that already holds costs one round-trip.
pub(crate) async fn poll_until<T, F, Fut>(options: WaitOptions, mut check: F) -> Result<Option<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Poll<T>>>,
{
    let deadline = Instant::now() + options.timeout;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match check().await {
            Ok(Poll::Ready(value)) => {
                trace!(attempt, "Wait condition satisfied");
                return Ok(Some(value));
            }
            Ok(Poll::Pending) => trace!(attempt, "Wait condition pending"),
            Err(e) if e.is_retryable_during_wait() => {
                trace!(attempt, error = %e, "Wait condition not yet true")
            }
            Err(e) => return Err(e),
        }

        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        sleep(options.interval.min(deadline - now)).await;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::{Error, ErrorCode};
    use crate::error::{Origin, ProtocolError};
    use crate::identifiers::Provenance;

    fn protocol_error(code: ErrorCode) -> Error {
        Error::protocol(ProtocolError {
            code,
            status: 404,
            message: "scripted".into(),
            stack_trace: None,
            data: None,
            context: Provenance::unavailable(),
            origin: Origin::Driver,
            invoker: "find element",
        })
    }

    fn options(timeout_ms: u64, interval_ms: u64) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(Duration::from_millis(timeout_ms))
            .with_interval(Duration::from_millis(interval_ms))
    }

    #[test]
    fn test_default_options() {
        let options = WaitOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.interval, Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_on_first_poll() {
        let polls = Cell::new(0);
        let start = Instant::now();

        let value = poll_until(options(1000, 200), || {
            polls.set(polls.get() + 1);
            async { Ok(Poll::Ready(7)) }
        })
        .await
        .unwrap();

        assert_eq!(value, Some(7));
        assert_eq!(polls.get(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_after_k_polls() {
        let k = 4;
        let polls = Cell::new(0);
        let start = Instant::now();

        let value = poll_until(options(2000, 200), || {
            polls.set(polls.get() + 1);
            let n = polls.get();
            async move {
                if n < k {
                    Err(protocol_error(ErrorCode::NoSuchElement))
                } else {
                    Ok(Poll::Ready(n))
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(value, Some(k));
        assert_eq!(polls.get(), k);
        assert_eq!(start.elapsed(), Duration::from_millis(200 * (k as u64 - 1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_times_out_within_one_interval() {
        let polls = Cell::new(0);
        let start = Instant::now();

        let value: Option<()> = poll_until(options(1000, 300), || {
            polls.set(polls.get() + 1);
            async { Ok(Poll::Pending) }
        })
        .await
        .unwrap();

        let elapsed = start.elapsed();
        assert!(value.is_none());
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed < Duration::from_millis(1300));
        // 0, 300, 600, 900, then clamped to 1000
        assert_eq!(polls.get(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_error_propagates_immediately() {
        let polls = Cell::new(0);
        let start = Instant::now();

        let err = poll_until::<(), _, _>(options(1000, 100), || {
            polls.set(polls.get() + 1);
            async { Err(protocol_error(ErrorCode::StaleElementReference)) }
        })
        .await
        .unwrap_err();

        assert!(err.is_stale());
        assert_eq!(polls.get(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_polls_once() {
        let polls = Cell::new(0);

        let value: Option<()> = poll_until(options(0, 200), || {
            polls.set(polls.get() + 1);
            async { Ok(Poll::Pending) }
        })
        .await
        .unwrap();

        assert!(value.is_none());
        assert_eq!(polls.get(), 1);
    }
}
