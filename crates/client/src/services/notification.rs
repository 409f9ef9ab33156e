//! Wiki notification endpoints.

use srdesk_core::notification::{Notification, NotificationCount};
use srdesk_core::types::{DbId, Page, PageQuery};

use crate::error::ClientResult;
use crate::transport::ApiClient;

/// Wrapper for `/wiki/notifications/*`.
#[derive(Clone)]
pub struct NotificationApi {
    client: ApiClient,
}

impl NotificationApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Paged notification feed for the authenticated user, newest first.
    pub async fn list(&self, page: PageQuery) -> ClientResult<Page<Notification>> {
        self.client
            .get_query(
                "/wiki/notifications",
                &[
                    ("page", page.page.to_string()),
                    ("size", page.size.to_string()),
                ],
            )
            .await
    }

    pub async fn unread(&self) -> ClientResult<Vec<Notification>> {
        self.client.get("/wiki/notifications/unread").await
    }

    /// Unread badge count.
    pub async fn unread_count(&self) -> ClientResult<NotificationCount> {
        self.client.get("/wiki/notifications/unread/count").await
    }

    pub async fn mark_read(&self, id: DbId) -> ClientResult<()> {
        self.client
            .post_unit(&format!("/wiki/notifications/{id}/read"))
            .await
    }

    pub async fn mark_all_read(&self) -> ClientResult<()> {
        self.client.post_unit("/wiki/notifications/read-all").await
    }

    pub async fn delete(&self, id: DbId) -> ClientResult<()> {
        self.client.delete(&format!("/wiki/notifications/{id}")).await
    }
}
