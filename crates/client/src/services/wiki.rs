//! Wiki document, category, and version endpoints.

use srdesk_core::types::{DbId, Page, PageQuery};
use srdesk_core::wiki::{
    WikiCategory, WikiCategoryRequest, WikiDocument, WikiDocumentRequest, WikiFile, WikiVersion,
};

use crate::error::ClientResult;
use crate::transport::ApiClient;

/// Wrapper for `/wiki/documents/*` and `/wiki/categories/*`.
#[derive(Clone)]
pub struct WikiApi {
    client: ApiClient,
}

impl WikiApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // ---- documents ----

    pub async fn list_documents(&self, page: PageQuery) -> ClientResult<Page<WikiDocument>> {
        self.client
            .get_query("/wiki/documents", &page_params(page))
            .await
    }

    pub async fn get_document(&self, id: DbId) -> ClientResult<WikiDocument> {
        self.client.get(&format!("/wiki/documents/{id}")).await
    }

    pub async fn create_document(&self, request: &WikiDocumentRequest) -> ClientResult<WikiDocument> {
        self.client.post("/wiki/documents", request).await
    }

    /// Updating creates a new version server-side; the response carries
    /// the bumped `currentVersion`.
    pub async fn update_document(
        &self,
        id: DbId,
        request: &WikiDocumentRequest,
    ) -> ClientResult<WikiDocument> {
        self.client
            .put(&format!("/wiki/documents/{id}"), request)
            .await
    }

    pub async fn delete_document(&self, id: DbId) -> ClientResult<()> {
        self.client.delete(&format!("/wiki/documents/{id}")).await
    }

    pub async fn documents_by_category(
        &self,
        category_id: DbId,
        page: PageQuery,
    ) -> ClientResult<Page<WikiDocument>> {
        self.client
            .get_query(
                &format!("/wiki/documents/category/{category_id}"),
                &page_params(page),
            )
            .await
    }

    /// Documents linked to one Service Request.
    pub async fn documents_by_sr(&self, sr_id: DbId) -> ClientResult<Vec<WikiDocument>> {
        self.client.get(&format!("/wiki/documents/sr/{sr_id}")).await
    }

    /// Keyword search over titles and content.
    pub async fn search_documents(
        &self,
        keyword: &str,
        page: PageQuery,
    ) -> ClientResult<Page<WikiDocument>> {
        let mut query = page_params(page);
        query.push(("keyword", keyword.to_string()));
        self.client.get_query("/wiki/documents/search", &query).await
    }

    pub async fn recent_documents(&self, limit: i64) -> ClientResult<Vec<WikiDocument>> {
        self.client
            .get_query("/wiki/documents/recent", &[("limit", limit.to_string())])
            .await
    }

    pub async fn popular_documents(&self, limit: i64) -> ClientResult<Vec<WikiDocument>> {
        self.client
            .get_query("/wiki/documents/popular", &[("limit", limit.to_string())])
            .await
    }

    // ---- versions ----

    pub async fn versions(&self, document_id: DbId) -> ClientResult<Vec<WikiVersion>> {
        self.client
            .get(&format!("/wiki/documents/{document_id}/versions"))
            .await
    }

    pub async fn versions_paged(
        &self,
        document_id: DbId,
        page: PageQuery,
    ) -> ClientResult<Page<WikiVersion>> {
        self.client
            .get_query(
                &format!("/wiki/documents/{document_id}/versions/paged"),
                &page_params(page),
            )
            .await
    }

    pub async fn version(&self, document_id: DbId, version: i64) -> ClientResult<WikiVersion> {
        self.client
            .get(&format!("/wiki/documents/{document_id}/versions/{version}"))
            .await
    }

    pub async fn latest_version(&self, document_id: DbId) -> ClientResult<WikiVersion> {
        self.client
            .get(&format!("/wiki/documents/{document_id}/versions/latest"))
            .await
    }

    /// Roll the document back to an earlier version. The rollback is
    /// itself recorded as a new version.
    pub async fn rollback(&self, document_id: DbId, version: i64) -> ClientResult<WikiDocument> {
        self.client
            .post_empty(&format!(
                "/wiki/documents/{document_id}/versions/{version}/rollback"
            ))
            .await
    }

    // ---- categories ----

    pub async fn categories(&self) -> ClientResult<Vec<WikiCategory>> {
        self.client.get("/wiki/categories").await
    }

    /// Top-level categories with their child trees.
    pub async fn root_categories(&self) -> ClientResult<Vec<WikiCategory>> {
        self.client.get("/wiki/categories/root").await
    }

    pub async fn child_categories(&self, parent_id: DbId) -> ClientResult<Vec<WikiCategory>> {
        self.client
            .get(&format!("/wiki/categories/parent/{parent_id}"))
            .await
    }

    pub async fn get_category(&self, id: DbId) -> ClientResult<WikiCategory> {
        self.client.get(&format!("/wiki/categories/{id}")).await
    }

    pub async fn search_categories(&self, keyword: &str) -> ClientResult<Vec<WikiCategory>> {
        self.client
            .get_query("/wiki/categories/search", &[("keyword", keyword)])
            .await
    }

    pub async fn create_category(&self, request: &WikiCategoryRequest) -> ClientResult<WikiCategory> {
        self.client.post("/wiki/categories", request).await
    }

    pub async fn update_category(
        &self,
        id: DbId,
        request: &WikiCategoryRequest,
    ) -> ClientResult<WikiCategory> {
        self.client
            .put(&format!("/wiki/categories/{id}"), request)
            .await
    }

    pub async fn delete_category(&self, id: DbId) -> ClientResult<()> {
        self.client.delete(&format!("/wiki/categories/{id}")).await
    }

    // ---- files ----

    /// Upload a file, optionally linking it to a document right away.
    /// Unlinked files can be attached later by the editor.
    pub async fn upload_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        document_id: Option<DbId>,
    ) -> ClientResult<WikiFile> {
        let name = file_name.to_string();
        self.client
            .post_multipart("/wiki/files/upload", move || {
                let part =
                    reqwest::multipart::Part::bytes(bytes.clone()).file_name(name.clone());
                let form = reqwest::multipart::Form::new().part("file", part);
                match document_id {
                    Some(id) => form.text("documentId", id.to_string()),
                    None => form,
                }
            })
            .await
    }

    pub async fn file_info(&self, file_id: DbId) -> ClientResult<WikiFile> {
        self.client.get(&format!("/wiki/files/{file_id}/info")).await
    }

    pub async fn files_by_document(&self, document_id: DbId) -> ClientResult<Vec<WikiFile>> {
        self.client
            .get(&format!("/wiki/files/document/{document_id}"))
            .await
    }

    /// Raw file bytes.
    pub async fn download_file(&self, file_id: DbId) -> ClientResult<Vec<u8>> {
        self.client.get_bytes(&format!("/wiki/files/{file_id}")).await
    }

    pub async fn delete_file(&self, file_id: DbId) -> ClientResult<()> {
        self.client.delete(&format!("/wiki/files/{file_id}")).await
    }
}

fn page_params(page: PageQuery) -> Vec<(&'static str, String)> {
    vec![
        ("page", page.page.to_string()),
        ("size", page.size.to_string()),
    ]
}
