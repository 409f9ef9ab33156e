//! AI search (RAG) and embedding/summary job DTOs.
//!
//! Embedding generation, retrieval, and summarization run entirely
//! server-side; these types describe the job-status payloads the
//! client polls and the search request/response pair.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, ResourceType, Timestamp};

// ---------------------------------------------------------------------------
// RAG search
// ---------------------------------------------------------------------------

/// Natural-language search request for `POST /wiki/search/ai`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSearchRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_threshold: Option<f64>,
}

impl AiSearchRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            top_k: None,
            category_id: None,
            similarity_threshold: None,
        }
    }

    /// Reject requests the server would refuse anyway.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.question.trim().is_empty() {
            return Err(CoreError::Validation("question must not be empty".into()));
        }
        if let Some(top_k) = self.top_k {
            if top_k < 1 {
                return Err(CoreError::Validation("topK must be at least 1".into()));
            }
        }
        Ok(())
    }
}

/// A source document cited in an AI answer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    pub document_id: DbId,
    pub title: String,
    pub category_name: Option<String>,
    pub snippet: String,
    pub relevance_score: f64,
}

/// RAG answer with its cited sources.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSearchResponse {
    pub answer: String,
    pub sources: Vec<SourceDocument>,
    pub processing_time_ms: i64,
}

// ---------------------------------------------------------------------------
// Embedding jobs
// ---------------------------------------------------------------------------

/// Status reported by embedding-job progress endpoints, both for a
/// single document and for a bulk per-resource-type run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Started,
    InProgress,
    Completed,
    Failed,
}

impl JobStatus {
    /// Whether this status ends the job's observation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Progress snapshot for a single-document embedding job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingProgress {
    pub document_id: DbId,
    pub document_title: Option<String>,
    pub status: JobStatus,
    pub current_chunk: i32,
    pub total_chunks: i32,
    pub progress_percent: i32,
    pub chunk_processing_time_ms: Option<i64>,
    pub elapsed_time_ms: Option<i64>,
    pub estimated_remaining_ms: Option<i64>,
    pub message: Option<String>,
}

/// Progress snapshot for a bulk embedding run over one resource type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEmbeddingProgress {
    pub resource_type: ResourceType,
    pub status: JobStatus,
    pub current_index: i32,
    pub total_count: i32,
    pub success_count: i32,
    pub failure_count: i32,
    pub progress_percent: i32,
    pub current_title: Option<String>,
    pub elapsed_time_ms: Option<i64>,
    pub estimated_remaining_ms: Option<i64>,
    pub message: Option<String>,
}

/// Per-document embedding state (not a job: a stored-data summary).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingStatus {
    pub document_id: DbId,
    pub has_embedding: bool,
    pub chunk_count: i32,
    pub last_embedding_date: Option<Timestamp>,
    pub document_updated_at: Option<Timestamp>,
    pub is_up_to_date: bool,
}

/// Embedded-resource counts per category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingStats {
    pub wiki_count: i64,
    pub sr_count: i64,
    pub survey_count: i64,
}

impl EmbeddingStats {
    pub fn total(&self) -> i64 {
        self.wiki_count + self.sr_count + self.survey_count
    }
}

// ---------------------------------------------------------------------------
// AI summaries
// ---------------------------------------------------------------------------

/// Status of a per-document AI summary.
///
/// `NeedsUpdate` means a stale cached result exists and regeneration is
/// implied but may not have started; it is not a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SummaryStatus {
    Cached,
    Generated,
    Generating,
    NeedsUpdate,
    Failed,
}

/// Summary payload returned by both the generate and status endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub document_id: DbId,
    pub summary: Option<String>,
    pub generated_at: Option<Timestamp>,
    pub processing_time_ms: Option<i64>,
    pub status: SummaryStatus,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_status_terminality() {
        assert!(!JobStatus::Started.is_terminal());
        assert!(!JobStatus::InProgress.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn summary_status_wire_names() {
        let s: SummaryStatus = serde_json::from_str("\"NEEDS_UPDATE\"").unwrap();
        assert_eq!(s, SummaryStatus::NeedsUpdate);
    }

    #[test]
    fn blank_question_fails_validation() {
        assert!(AiSearchRequest::new("   ").validate().is_err());
        assert!(AiSearchRequest::new("vpn setup").validate().is_ok());
        let mut req = AiSearchRequest::new("vpn setup");
        req.top_k = Some(0);
        assert!(req.validate().is_err());
    }

    #[test]
    fn search_request_omits_unset_options() {
        let req = AiSearchRequest::new("how do we rotate tokens?");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "question": "how do we rotate tokens?" })
        );
    }
}
