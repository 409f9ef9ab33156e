//! AI search, embedding, and summary endpoints under `/wiki/search`.

use serde::Deserialize;
use srdesk_core::search::{
    AiSearchRequest, AiSearchResponse, BulkEmbeddingProgress, EmbeddingProgress, EmbeddingStats,
    EmbeddingStatus, JobStatus, SummaryResponse,
};
use srdesk_core::types::{DbId, ResourceType};

use crate::error::{ClientError, ClientResult};
use crate::transport::ApiClient;

/// Acknowledgement for a bulk embedding kick-off.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStartResponse {
    pub status: JobStatus,
    #[serde(default)]
    pub message: Option<String>,
}

/// Wrapper for `/wiki/search/*`.
#[derive(Clone)]
pub struct AiSearchApi {
    client: ApiClient,
}

impl AiSearchApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Semantic search with an LLM-generated answer and its source
    /// documents.
    pub async fn search(&self, request: &AiSearchRequest) -> ClientResult<AiSearchResponse> {
        request.validate()?;
        self.client.post("/wiki/search/ai", request).await
    }

    // ---- per-document embeddings ----

    /// Synchronous (re)generation; blocks until the server finishes.
    pub async fn generate_embeddings(&self, document_id: DbId) -> ClientResult<String> {
        self.client
            .post_text(&format!("/wiki/search/embeddings/{document_id}"))
            .await
    }

    /// Fire-and-forget generation; track it with
    /// [`current_progress`](Self::current_progress) or the watcher in
    /// [`crate::progress`].
    pub async fn generate_embeddings_async(&self, document_id: DbId) -> ClientResult<String> {
        self.client
            .post_text(&format!("/wiki/search/embeddings/async/{document_id}"))
            .await
    }

    pub async fn embedding_status(&self, document_id: DbId) -> ClientResult<EmbeddingStatus> {
        self.client
            .get(&format!("/wiki/search/embeddings/status/{document_id}"))
            .await
    }

    /// Latest progress event for a running per-document job, or `None`
    /// when no job is active.
    pub async fn current_progress(
        &self,
        document_id: DbId,
    ) -> ClientResult<Option<EmbeddingProgress>> {
        none_on_not_found(
            self.client
                .get(&format!(
                    "/wiki/search/embeddings/progress/current/{document_id}"
                ))
                .await,
        )
    }

    // ---- bulk embeddings ----

    /// Start regenerating embeddings for every resource of one type.
    /// Returns `IN_PROGRESS` with a message when a job is already
    /// running.
    pub async fn start_bulk(&self, resource: ResourceType) -> ClientResult<BulkStartResponse> {
        self.client
            .post_empty(&format!(
                "/wiki/search/embeddings/{}/all",
                bulk_segment(resource)
            ))
            .await
    }

    /// Latest progress event for a running bulk job, or `None` when no
    /// job is active for that resource type.
    pub async fn bulk_progress(
        &self,
        resource: ResourceType,
    ) -> ClientResult<Option<BulkEmbeddingProgress>> {
        none_on_not_found(
            self.client
                .get(&format!(
                    "/wiki/search/embeddings/bulk/progress/{}",
                    resource.as_str()
                ))
                .await,
        )
    }

    pub async fn delete_all_embeddings(&self, resource: ResourceType) -> ClientResult<()> {
        self.client
            .delete(&format!(
                "/wiki/search/embeddings/{}/all",
                bulk_segment(resource)
            ))
            .await
    }

    /// Stored embedding counts per resource type.
    pub async fn stats(&self) -> ClientResult<EmbeddingStats> {
        self.client.get("/wiki/search/embeddings/stats").await
    }

    // ---- summaries ----

    /// Request a document summary. `CACHED`/`GENERATED` responses carry
    /// the text; `GENERATING` means a background job was started (or is
    /// already running) and the caller should poll
    /// [`summary_status`](Self::summary_status).
    pub async fn generate_summary(
        &self,
        document_id: DbId,
        force_regenerate: bool,
    ) -> ClientResult<SummaryResponse> {
        let path = format!(
            "/wiki/search/summary/{document_id}?forceRegenerate={force_regenerate}"
        );
        self.client.post_empty(&path).await
    }

    pub async fn summary_status(&self, document_id: DbId) -> ClientResult<SummaryResponse> {
        self.client
            .get(&format!("/wiki/search/summary/{document_id}"))
            .await
    }
}

/// Bulk routes use lowercase type segments (`wiki`, `sr`, `survey`);
/// the progress route uses the uppercase enum form.
fn bulk_segment(resource: ResourceType) -> &'static str {
    match resource {
        ResourceType::Wiki => "wiki",
        ResourceType::Sr => "sr",
        ResourceType::Survey => "survey",
    }
}

fn none_on_not_found<T>(result: ClientResult<T>) -> ClientResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ClientError::Api { status: 404, .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_segments_are_lowercase() {
        assert_eq!(bulk_segment(ResourceType::Wiki), "wiki");
        assert_eq!(bulk_segment(ResourceType::Sr), "sr");
        assert_eq!(bulk_segment(ResourceType::Survey), "survey");
    }

    #[test]
    fn not_found_maps_to_none() {
        let miss: ClientResult<u32> = Err(ClientError::Api {
            status: 404,
            message: "no active job".into(),
        });
        assert!(matches!(none_on_not_found(miss), Ok(None)));

        let other: ClientResult<u32> = Err(ClientError::Api {
            status: 500,
            message: "boom".into(),
        });
        assert!(matches!(
            none_on_not_found(other),
            Err(ClientError::Api { status: 500, .. })
        ));
    }
}
