//! User-management endpoints. All but `update_me` are admin-only;
//! authorization is enforced server-side.

use srdesk_core::types::{DbId, Page, PageQuery};
use srdesk_core::user::{User, UserCreateRequest, UserUpdateRequest};

use crate::error::ClientResult;
use crate::transport::ApiClient;

/// Wrapper for `/users/*`.
#[derive(Clone)]
pub struct UserApi {
    client: ApiClient,
}

impl UserApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Paged account listing.
    pub async fn list(&self, page: PageQuery) -> ClientResult<Page<User>> {
        self.client
            .get_query(
                "/users",
                &[
                    ("page", page.page.to_string()),
                    ("size", page.size.to_string()),
                ],
            )
            .await
    }

    pub async fn create(&self, request: &UserCreateRequest) -> ClientResult<User> {
        self.client.post("/users", request).await
    }

    pub async fn update(&self, id: DbId, request: &UserUpdateRequest) -> ClientResult<User> {
        self.client.put(&format!("/users/{id}"), request).await
    }

    pub async fn delete(&self, id: DbId) -> ClientResult<()> {
        self.client.delete(&format!("/users/{id}")).await
    }

    /// Update the authenticated user's own profile; the session copy
    /// is refreshed from the response.
    pub async fn update_me(&self, request: &UserUpdateRequest) -> ClientResult<User> {
        let user: User = self.client.put("/users/me", request).await?;
        self.client.session().set_user(user.clone());
        Ok(user)
    }

    /// Flat user list for assignee dropdowns.
    pub async fn options(&self) -> ClientResult<Vec<User>> {
        self.client.get("/users/options").await
    }
}
