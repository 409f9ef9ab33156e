//! Concrete polling subscriptions for embedding and summary jobs.
//!
//! These bind the generic driver in [`crate::poll`] to the AI-search
//! endpoints: per-document and bulk embedding watchers poll every
//! second with no cap (the jobs are server-bounded), the summary
//! watcher polls every two seconds with a hard budget of 60 polls.

use srdesk_core::progress::{
    classify_bulk, classify_embedding, classify_summary, PollPolicy, SUMMARY_FAILED_FALLBACK,
};
use srdesk_core::search::{BulkEmbeddingProgress, EmbeddingProgress, SummaryResponse, SummaryStatus};
use srdesk_core::types::{DbId, ResourceType};

use crate::error::{ClientError, ClientResult};
use crate::poll::{subscribe, PollEvent, Subscription};
use crate::transport::ApiClient;

/// Watch a per-document embedding job.
///
/// Delivers one `Progress` per chunk update and a terminal
/// `Completed`/`Failed` when the job ends. Cancel the subscription to
/// stop watching; the server job keeps running.
pub fn watch_embedding(client: &ApiClient, document_id: DbId) -> Subscription<EmbeddingProgress> {
    let api = client.ai_search();
    subscribe(PollPolicy::embedding(), move || {
        let api = api.clone();
        async move {
            api.current_progress(document_id)
                .await
                .map(classify_embedding)
        }
    })
}

/// Watch a bulk embedding job for one resource type.
pub fn watch_bulk_embedding(
    client: &ApiClient,
    resource: ResourceType,
) -> Subscription<BulkEmbeddingProgress> {
    let api = client.ai_search();
    subscribe(PollPolicy::embedding(), move || {
        let api = api.clone();
        async move { api.bulk_progress(resource).await.map(classify_bulk) }
    })
}

/// Outcome of a summary request.
pub enum SummaryOutcome {
    /// The server answered with a finished summary (cached or freshly
    /// generated).
    Ready(SummaryResponse),
    /// The server reported failure without starting a job.
    Failed { message: String },
    /// Generation is running in the background; poll the subscription
    /// for the result. The subscription times out after its poll
    /// budget (two minutes of server silence).
    Generating(Subscription<SummaryResponse>),
}

/// Drive a summary subscription to its terminal event, mapping job
/// failure and poll-budget exhaustion onto SDK errors.
pub async fn await_summary(
    mut subscription: Subscription<SummaryResponse>,
) -> ClientResult<SummaryResponse> {
    while let Some(event) = subscription.next_event().await {
        match event {
            PollEvent::Progress(_) => {}
            PollEvent::Completed(summary) => return Ok(summary),
            PollEvent::Failed { message } => return Err(ClientError::JobFailed(message)),
            PollEvent::TimedOut => return Err(ClientError::Timeout),
        }
    }
    // Cancelled before any terminal event.
    Err(ClientError::Timeout)
}

/// Request a document summary, transparently following the generating
/// path when the server starts a background job.
pub async fn request_summary(
    client: &ApiClient,
    document_id: DbId,
    force_regenerate: bool,
) -> ClientResult<SummaryOutcome> {
    let api = client.ai_search();
    let response = api.generate_summary(document_id, force_regenerate).await?;

    match response.status {
        SummaryStatus::Cached | SummaryStatus::Generated => Ok(SummaryOutcome::Ready(response)),
        SummaryStatus::Failed => Ok(SummaryOutcome::Failed {
            message: response
                .message
                .unwrap_or_else(|| SUMMARY_FAILED_FALLBACK.to_string()),
        }),
        SummaryStatus::Generating | SummaryStatus::NeedsUpdate => {
            tracing::debug!(document_id, "Summary generating, starting status poller");
            let subscription = subscribe(PollPolicy::summary(), move || {
                let api = api.clone();
                async move { api.summary_status(document_id).await.map(classify_summary) }
            });
            Ok(SummaryOutcome::Generating(subscription))
        }
    }
}
