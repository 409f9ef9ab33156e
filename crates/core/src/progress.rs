//! Poll-response classification for long-running backend jobs.
//!
//! The backend exposes job progress as plain status endpoints and the
//! client observes them by fixed-interval polling. This module is the
//! pure half of that mechanism: policies (interval, optional cap) and
//! classifiers that turn one response into the subscription's next
//! step. The async driver lives in `srdesk-client`.

use std::time::Duration;

use crate::search::{
    BulkEmbeddingProgress, EmbeddingProgress, JobStatus, SummaryResponse, SummaryStatus,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Interval between embedding-progress polls (single and bulk).
pub const EMBEDDING_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Interval between summary-status polls.
pub const SUMMARY_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Cap on summary polls: 60 polls at 2 seconds = two minutes.
pub const SUMMARY_MAX_POLLS: u32 = 60;

/// Fallback messages when a FAILED response carries no server message.
pub const EMBEDDING_FAILED_FALLBACK: &str = "embedding generation failed";
pub const BULK_EMBEDDING_FAILED_FALLBACK: &str = "bulk embedding failed";
pub const SUMMARY_FAILED_FALLBACK: &str = "summary generation failed";

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Tunable parameters for one polling subscription.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    /// Delay between polls. The first poll is issued immediately.
    pub interval: Duration,
    /// Maximum number of polls before the subscription reports a
    /// timeout. `None` polls until a terminal status or cancellation.
    pub max_polls: Option<u32>,
}

impl PollPolicy {
    /// Policy for embedding progress (single-document and bulk).
    ///
    /// Unbounded: batch length is server-driven and the caller holds a
    /// cancel handle.
    pub fn embedding() -> Self {
        Self {
            interval: EMBEDDING_POLL_INTERVAL,
            max_polls: None,
        }
    }

    /// Policy for summary generation: a user is actively waiting on a
    /// single document, so the wait is capped.
    pub fn summary() -> Self {
        Self {
            interval: SUMMARY_POLL_INTERVAL,
            max_polls: Some(SUMMARY_MAX_POLLS),
        }
    }

    /// True when `polls` completed polls have consumed the cap, i.e.
    /// the next poll must not be issued.
    pub fn is_exhausted(&self, polls: u32) -> bool {
        matches!(self.max_polls, Some(max) if polls >= max)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// What one poll response means for the subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum PollStep<T> {
    /// Nothing to report yet; keep polling.
    Pending,
    /// Non-terminal progress to deliver; keep polling.
    Progress(T),
    /// Success-terminal payload; deliver and stop.
    Complete(T),
    /// Failure-terminal; deliver the message and stop.
    Failed { message: String },
}

/// Classify a single-document embedding progress response.
///
/// `None` means no progress record exists yet for the document (the
/// job may not have started); treated as pending.
pub fn classify_embedding(event: Option<EmbeddingProgress>) -> PollStep<EmbeddingProgress> {
    match event {
        None => PollStep::Pending,
        Some(ev) => match ev.status {
            JobStatus::Started | JobStatus::InProgress => PollStep::Progress(ev),
            JobStatus::Completed => PollStep::Complete(ev),
            JobStatus::Failed => PollStep::Failed {
                message: ev
                    .message
                    .unwrap_or_else(|| EMBEDDING_FAILED_FALLBACK.to_string()),
            },
        },
    }
}

/// Classify a bulk embedding progress response.
pub fn classify_bulk(event: Option<BulkEmbeddingProgress>) -> PollStep<BulkEmbeddingProgress> {
    match event {
        None => PollStep::Pending,
        Some(ev) => match ev.status {
            JobStatus::Started | JobStatus::InProgress => PollStep::Progress(ev),
            JobStatus::Completed => PollStep::Complete(ev),
            JobStatus::Failed => PollStep::Failed {
                message: ev
                    .message
                    .unwrap_or_else(|| BULK_EMBEDDING_FAILED_FALLBACK.to_string()),
            },
        },
    }
}

/// Classify a summary-status response.
///
/// NEEDS_UPDATE continues polling: a generate request was accepted but
/// regeneration may not have started yet.
pub fn classify_summary(response: SummaryResponse) -> PollStep<SummaryResponse> {
    match response.status {
        SummaryStatus::Generating | SummaryStatus::NeedsUpdate => PollStep::Pending,
        SummaryStatus::Cached | SummaryStatus::Generated => PollStep::Complete(response),
        SummaryStatus::Failed => PollStep::Failed {
            message: response
                .message
                .unwrap_or_else(|| SUMMARY_FAILED_FALLBACK.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::types::ResourceType;

    fn bulk(status: JobStatus, message: Option<&str>) -> BulkEmbeddingProgress {
        BulkEmbeddingProgress {
            resource_type: ResourceType::Wiki,
            status,
            current_index: 40,
            total_count: 100,
            success_count: 40,
            failure_count: 0,
            progress_percent: 40,
            current_title: None,
            elapsed_time_ms: None,
            estimated_remaining_ms: None,
            message: message.map(str::to_string),
        }
    }

    fn summary(status: SummaryStatus, message: Option<&str>) -> SummaryResponse {
        SummaryResponse {
            document_id: 7,
            summary: None,
            generated_at: None,
            processing_time_ms: None,
            status,
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn missing_progress_is_pending() {
        assert_matches!(classify_embedding(None), PollStep::Pending);
        assert_matches!(classify_bulk(None), PollStep::Pending);
    }

    #[test]
    fn started_and_in_progress_route_to_progress() {
        assert_matches!(
            classify_bulk(Some(bulk(JobStatus::Started, None))),
            PollStep::Progress(_)
        );
        assert_matches!(
            classify_bulk(Some(bulk(JobStatus::InProgress, None))),
            PollStep::Progress(_)
        );
    }

    #[test]
    fn failed_uses_server_message_or_fallback() {
        assert_matches!(
            classify_bulk(Some(bulk(JobStatus::Failed, Some("model unavailable")))),
            PollStep::Failed { message } if message == "model unavailable"
        );
        assert_matches!(
            classify_bulk(Some(bulk(JobStatus::Failed, None))),
            PollStep::Failed { message } if message == BULK_EMBEDDING_FAILED_FALLBACK
        );
    }

    #[test]
    fn needs_update_is_a_no_op() {
        assert_matches!(
            classify_summary(summary(SummaryStatus::NeedsUpdate, None)),
            PollStep::Pending
        );
        assert_matches!(
            classify_summary(summary(SummaryStatus::Generating, None)),
            PollStep::Pending
        );
    }

    #[test]
    fn cached_and_generated_complete() {
        assert_matches!(
            classify_summary(summary(SummaryStatus::Cached, None)),
            PollStep::Complete(_)
        );
        assert_matches!(
            classify_summary(summary(SummaryStatus::Generated, None)),
            PollStep::Complete(_)
        );
    }

    #[test]
    fn summary_policy_exhausts_at_cap() {
        let policy = PollPolicy::summary();
        assert!(!policy.is_exhausted(59));
        assert!(policy.is_exhausted(60));
        assert!(policy.is_exhausted(61));
    }

    #[test]
    fn embedding_policy_never_exhausts() {
        let policy = PollPolicy::embedding();
        assert!(!policy.is_exhausted(u32::MAX));
    }
}
