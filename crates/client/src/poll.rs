//! Generic cancellable polling subscription.
//!
//! [`subscribe`] spawns a background task that polls a fetch closure on
//! a fixed interval (first poll immediately), classifies each response
//! via [`PollStep`], and forwards events over a channel. The task exits
//! after the first terminal event, when the poll budget is exhausted,
//! or when the subscription is cancelled.
//!
//! Guarantees:
//! - a terminal event ([`PollEvent::Completed`], [`PollEvent::Failed`]
//!   or [`PollEvent::TimedOut`]) is delivered at most once, and nothing
//!   follows it;
//! - a completed job delivers its final payload as a last
//!   [`PollEvent::Progress`] before `Completed`, so consumers always
//!   render the 100% state;
//! - after [`Subscription::cancel`] no further event is delivered, even
//!   if a request was in flight when the cancel landed;
//! - with a poll budget of `n`, request `n + 1` is never issued; the
//!   budget check runs before the fetch.
//!
//! Transport errors from the fetch closure are logged and do not end
//! the subscription; the next tick retries. Each attempt, failed or
//! not, spends one unit of the poll budget.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use srdesk_core::progress::{PollPolicy, PollStep};

// ----------------------------------------------------------------------------
// Events
// ----------------------------------------------------------------------------

/// Event stream of one polling subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent<T> {
    /// A non-terminal response carrying progress data.
    Progress(T),
    /// The job finished; terminal.
    Completed(T),
    /// The job reported failure; terminal.
    Failed { message: String },
    /// The poll budget ran out before the job finished; terminal.
    TimedOut,
}

// ----------------------------------------------------------------------------
// Subscription handle
// ----------------------------------------------------------------------------

/// Handle to a running poller. Dropping it cancels the background task.
pub struct Subscription<T> {
    events: mpsc::UnboundedReceiver<PollEvent<T>>,
    cancel: CancellationToken,
    _task: JoinHandle<()>,
}

impl<T> Subscription<T> {
    /// Next event, or `None` once the subscription has ended.
    pub async fn next_event(&mut self) -> Option<PollEvent<T>> {
        self.events.recv().await
    }

    /// Stop polling. Idempotent; safe to call from any task.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ----------------------------------------------------------------------------
// Driver
// ----------------------------------------------------------------------------

/// Start polling `poll_fn` under `policy`.
///
/// The closure is invoked once per tick and returns how the latest
/// response classifies: still pending, progress to surface, or a
/// terminal outcome.
pub fn subscribe<T, E, F, Fut>(policy: PollPolicy, mut poll_fn: F) -> Subscription<T>
where
    T: Clone + Send + 'static,
    E: std::fmt::Display + Send + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<PollStep<T>, E>> + Send,
{
    let cancel = CancellationToken::new();
    let (tx, rx) = mpsc::unbounded_channel();

    let token = cancel.clone();
    let task = tokio::spawn(async move {
        let mut polls: u32 = 0;
        let mut ticker = tokio::time::interval(policy.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = ticker.tick() => {}
            }

            if policy.is_exhausted(polls) {
                tracing::warn!(polls, "Poll budget exhausted before job completed");
                let _ = tx.send(PollEvent::TimedOut);
                return;
            }
            polls += 1;

            let step = tokio::select! {
                _ = token.cancelled() => return,
                result = poll_fn() => result,
            };
            // A cancel may land while the response is being processed.
            if token.is_cancelled() {
                return;
            }

            match step {
                Ok(PollStep::Pending) => {}
                Ok(PollStep::Progress(progress)) => {
                    let _ = tx.send(PollEvent::Progress(progress));
                }
                Ok(PollStep::Complete(payload)) => {
                    let _ = tx.send(PollEvent::Progress(payload.clone()));
                    let _ = tx.send(PollEvent::Completed(payload));
                    return;
                }
                Ok(PollStep::Failed { message }) => {
                    let _ = tx.send(PollEvent::Failed { message });
                    return;
                }
                Err(e) => {
                    tracing::warn!(error = %e, polls, "Poll request failed, will retry");
                }
            }
        }
    });

    Subscription {
        events: rx,
        cancel,
        _task: task,
    }
}
