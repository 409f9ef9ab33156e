//! Service Request endpoints.

use srdesk_core::sr::{
    Sr, SrCreateRequest, SrFilter, SrHistory, SrStatus, SrStatusUpdateRequest, SrUpdateRequest,
};
use srdesk_core::types::{DbId, Page, PageQuery};

use crate::error::ClientResult;
use crate::transport::ApiClient;

/// Wrapper for `/sr/*`.
#[derive(Clone)]
pub struct SrApi {
    client: ApiClient,
}

impl SrApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Paged SR listing with optional status/priority/text filters.
    pub async fn list(&self, page: PageQuery, filter: &SrFilter) -> ClientResult<Page<Sr>> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", page.page.to_string()),
            ("size", page.size.to_string()),
        ];
        if let Some(status) = filter.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(priority) = filter.priority {
            query.push(("priority", priority.as_str().to_string()));
        }
        if let Some(search) = &filter.search {
            query.push(("search", search.clone()));
        }
        self.client.get_query("/sr", &query).await
    }

    pub async fn get(&self, id: DbId) -> ClientResult<Sr> {
        self.client.get(&format!("/sr/{id}")).await
    }

    pub async fn create(&self, request: &SrCreateRequest) -> ClientResult<Sr> {
        self.client.post("/sr", request).await
    }

    pub async fn update(&self, id: DbId, request: &SrUpdateRequest) -> ClientResult<Sr> {
        self.client.put(&format!("/sr/{id}"), request).await
    }

    /// Request a status transition; legality is enforced server-side.
    pub async fn update_status(&self, id: DbId, status: SrStatus) -> ClientResult<Sr> {
        self.client
            .patch(
                &format!("/sr/{id}/status"),
                &SrStatusUpdateRequest { status },
            )
            .await
    }

    pub async fn delete(&self, id: DbId) -> ClientResult<()> {
        self.client.delete(&format!("/sr/{id}")).await
    }

    /// Restore a soft-deleted SR.
    pub async fn restore(&self, id: DbId) -> ClientResult<Sr> {
        self.client.post_empty(&format!("/sr/{id}/restore")).await
    }

    /// Change history for one SR, newest first.
    pub async fn histories(&self, id: DbId) -> ClientResult<Vec<SrHistory>> {
        self.client.get(&format!("/sr/{id}/histories")).await
    }
}
