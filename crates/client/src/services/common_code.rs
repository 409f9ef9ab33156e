//! Common-code (admin-managed lookup value) endpoints.

use srdesk_core::common_code::{CommonCode, CommonCodeRequest};
use srdesk_core::types::DbId;

use crate::error::ClientResult;
use crate::transport::ApiClient;

/// Wrapper for `/common-codes/*`.
#[derive(Clone)]
pub struct CommonCodeApi {
    client: ApiClient,
}

impl CommonCodeApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Distinct group names currently in use.
    pub async fn groups(&self) -> ClientResult<Vec<String>> {
        self.client.get("/common-codes/groups").await
    }

    /// All codes in a group, ordered by `sortOrder`.
    pub async fn by_group(&self, group: &str) -> ClientResult<Vec<CommonCode>> {
        self.client.get(&format!("/common-codes/{group}")).await
    }

    /// Active codes only; this is what dropdowns consume.
    pub async fn active_by_group(&self, group: &str) -> ClientResult<Vec<CommonCode>> {
        self.client
            .get(&format!("/common-codes/{group}/active"))
            .await
    }

    pub async fn create(&self, request: &CommonCodeRequest) -> ClientResult<CommonCode> {
        self.client.post("/common-codes", request).await
    }

    pub async fn update(&self, id: DbId, request: &CommonCodeRequest) -> ClientResult<CommonCode> {
        self.client.put(&format!("/common-codes/{id}"), request).await
    }

    pub async fn delete(&self, id: DbId) -> ClientResult<()> {
        self.client.delete(&format!("/common-codes/{id}")).await
    }

    /// Persist a new ordering for a whole group in one call.
    pub async fn reorder(&self, codes: &[CommonCode]) -> ClientResult<()> {
        self.client.put_unit("/common-codes/reorder", codes).await
    }
}
