//! Open-API survey endpoints.

use srdesk_core::survey::{OpenApiSurvey, OrganizationOption, SurveyFilter, SurveyRequest};
use srdesk_core::types::{DbId, Page, PageQuery};

use crate::error::ClientResult;
use crate::transport::ApiClient;

/// Wrapper for `/surveys/*`.
#[derive(Clone)]
pub struct SurveyApi {
    client: ApiClient,
}

impl SurveyApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Paged survey listing with keyword/method filters.
    pub async fn list(
        &self,
        page: PageQuery,
        filter: &SurveyFilter,
    ) -> ClientResult<Page<OpenApiSurvey>> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", page.page.to_string()),
            ("size", page.size.to_string()),
        ];
        if let Some(keyword) = &filter.keyword {
            query.push(("keyword", keyword.clone()));
        }
        if let Some(method) = &filter.current_method {
            query.push(("currentMethod", method.clone()));
        }
        if let Some(method) = &filter.desired_method {
            query.push(("desiredMethod", method.clone()));
        }
        self.client.get_query("/surveys", &query).await
    }

    pub async fn get(&self, id: DbId) -> ClientResult<OpenApiSurvey> {
        self.client.get(&format!("/surveys/{id}")).await
    }

    pub async fn create(&self, request: &SurveyRequest) -> ClientResult<OpenApiSurvey> {
        self.client.post("/surveys", request).await
    }

    pub async fn update(&self, id: DbId, request: &SurveyRequest) -> ClientResult<OpenApiSurvey> {
        self.client.put(&format!("/surveys/{id}"), request).await
    }

    pub async fn delete(&self, id: DbId) -> ClientResult<()> {
        self.client.delete(&format!("/surveys/{id}")).await
    }

    /// Look up organizations by name from the standard code registry.
    pub async fn search_organizations(
        &self,
        keyword: &str,
    ) -> ClientResult<Vec<OrganizationOption>> {
        self.client
            .get_query("/organizations", &[("keyword", keyword)])
            .await
    }

    /// Export one survey as a spreadsheet (raw bytes).
    pub async fn download(&self, id: DbId) -> ClientResult<Vec<u8>> {
        self.client.get_bytes(&format!("/surveys/{id}/download")).await
    }
}
