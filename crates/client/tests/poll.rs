//! Behavioral tests for the polling subscription driver, run on paused
//! tokio time so intervals resolve instantly and deterministically.

use std::convert::Infallible;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use srdesk_client::poll::{subscribe, PollEvent};
use srdesk_core::progress::{PollPolicy, PollStep};

async fn drain<T: Clone + Send + 'static>(
    mut sub: srdesk_client::poll::Subscription<T>,
) -> Vec<PollEvent<T>> {
    let mut events = Vec::new();
    while let Some(event) = sub.next_event().await {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn completed_job_delivers_final_progress_then_completed() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();

    // Five in-progress responses, then a completed one.
    let sub = subscribe(PollPolicy::embedding(), move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            Ok::<_, Infallible>(if n < 5 {
                PollStep::Progress(n)
            } else {
                PollStep::Complete(n)
            })
        }
    });

    let events = drain(sub).await;

    let progress: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, PollEvent::Progress(_)))
        .collect();
    assert_eq!(progress.len(), 6, "terminal payload arrives as progress too");
    assert_eq!(events.last(), Some(&PollEvent::Completed(5)));
    // Terminal stops the poller: no seventh request.
    assert_eq!(calls.load(Ordering::SeqCst), 6);
}

#[tokio::test(start_paused = true)]
async fn bounded_poller_times_out_without_extra_request() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();

    let sub = subscribe(PollPolicy::summary(), move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async move { Ok::<PollStep<u32>, Infallible>(PollStep::Pending) }
    });

    let events = drain(sub).await;

    assert_eq!(events, vec![PollEvent::TimedOut]);
    // Budget is 60: the 61st request is never issued.
    assert_eq!(calls.load(Ordering::SeqCst), 60);
}

#[tokio::test(start_paused = true)]
async fn transient_errors_keep_the_poller_alive() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();

    let sub = subscribe(PollPolicy::embedding(), move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            match n {
                0 => Err("connection reset"),
                1 => Ok(PollStep::Progress(1u32)),
                _ => Ok(PollStep::Complete(2)),
            }
        }
    });

    let events = drain(sub).await;

    assert_eq!(
        events,
        vec![
            PollEvent::Progress(1),
            PollEvent::Progress(2),
            PollEvent::Completed(2),
        ]
    );
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn failed_job_is_terminal() {
    let sub = subscribe(PollPolicy::embedding(), move || async move {
        Ok::<PollStep<u32>, Infallible>(PollStep::Failed {
            message: "model unavailable".into(),
        })
    });

    let events = drain(sub).await;

    assert_eq!(
        events,
        vec![PollEvent::Failed {
            message: "model unavailable".into()
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn cancel_suppresses_in_flight_response() {
    let gate = Arc::new(tokio::sync::Notify::new());
    let release = gate.clone();

    let mut sub = subscribe(PollPolicy::embedding(), move || {
        let gate = gate.clone();
        async move {
            gate.notified().await;
            Ok::<_, Infallible>(PollStep::Complete(1u32))
        }
    });

    // Let the first poll start and block on the gate.
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    sub.cancel();
    sub.cancel(); // idempotent
    release.notify_one();

    assert_eq!(sub.next_event().await, None);
}
