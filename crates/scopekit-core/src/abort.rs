//! One-shot abort signals.
//!
//! A single [`CancellationToken`] backs every signal. Listeners and the
//! [`AbortSignal::aborted`] future are two views of that token, so they always
//! observe the same abort event.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Owns a timeout timer. The timer task is aborted once the last signal
/// derived from it is dropped.
struct TimerGuard {
    handle: JoinHandle<()>,
    _parent: Option<Arc<TimerGuard>>,
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Signal that fires once when an operation should abort.
///
/// Derived signals fire when their own condition is met or when any ancestor
/// fires. Firing a derived signal never affects its ancestors.
#[derive(Clone)]
pub struct AbortSignal {
    token: CancellationToken,
    timers: Option<Arc<TimerGuard>>,
}

impl AbortSignal {
    /// Create a signal that never fires on its own.
    pub fn never() -> Self {
        Self {
            token: CancellationToken::new(),
            timers: None,
        }
    }

    /// Derive a signal that also fires when the returned trigger is invoked.
    pub fn child(&self) -> (AbortSignal, AbortTrigger) {
        let token = self.token.child_token();
        let signal = Self {
            token: token.clone(),
            timers: self.timers.clone(),
        };
        (signal, AbortTrigger { token })
    }

    /// Derive a signal that also fires once `timeout` has elapsed.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime, since the timer runs on a
    /// spawned task.
    pub fn child_with_timeout(&self, timeout: Duration) -> AbortSignal {
        let token = self.token.child_token();
        let deadline = Instant::now().checked_add(timeout);
        let timer = token.clone();

        let handle = tokio::spawn(async move {
            match deadline {
                Some(deadline) => {
                    tokio::select! {
                        _ = tokio::time::sleep_until(deadline) => {
                            trace!(
                                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                                "Timeout elapsed"
                            );
                            timer.cancel();
                        }
                        _ = timer.cancelled() => {}
                    }
                }
                // Unrepresentable deadline, only an ancestor can fire this signal.
                None => timer.cancelled().await,
            }
        });

        Self {
            token,
            timers: Some(Arc::new(TimerGuard {
                handle,
                _parent: self.timers.clone(),
            })),
        }
    }

    /// Check if the signal has fired.
    pub fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Future that resolves once the signal fires.
    pub fn aborted(&self) -> impl Future<Output = ()> + Send + use<> {
        let signal = self.clone();
        async move { signal.token.cancelled().await }
    }

    /// Register a listener that runs once, on a spawned task, after the signal fires.
    ///
    /// Listeners run in no particular order relative to each other.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn add_listener<F>(&self, listener: F) -> JoinHandle<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let signal = self.clone();
        tokio::spawn(async move {
            signal.token.cancelled().await;
            listener();
        })
    }
}

impl Default for AbortSignal {
    fn default() -> Self {
        Self::never()
    }
}

impl fmt::Debug for AbortSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbortSignal")
            .field("aborted", &self.is_aborted())
            .field("timed", &self.timers.is_some())
            .finish()
    }
}

/// Manually fires the signal it was created with.
#[derive(Debug, Clone)]
pub struct AbortTrigger {
    token: CancellationToken,
}

impl AbortTrigger {
    /// Fire the signal. Calling this after the signal already fired is a no-op.
    pub fn abort(&self) {
        self.token.cancel();
    }

    pub fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[cfg(test)]
#[path = "abort_tests.rs"]
mod tests;
