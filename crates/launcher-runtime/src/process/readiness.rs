//! One-shot deferred action that can be cancelled before it fires.

use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Cancellable delayed action.
///
/// The action runs on a spawned task once `delay` has elapsed, unless
/// `cancel` is called (or the timer dropped) first. The action itself must
/// still verify that it is relevant: cancellation can race with firing.
#[derive(Debug)]
pub struct ReadinessTimer {
    cancel: CancellationToken,
}

impl ReadinessTimer {
    /// Schedule `action` after `delay`. Must be called within a tokio runtime.
    pub fn schedule<F>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => debug!("Readiness timer cancelled"),
                () = sleep(delay) => action(),
            }
        });

        Self { cancel }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for ReadinessTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
