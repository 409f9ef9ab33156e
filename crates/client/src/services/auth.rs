//! Authentication endpoints.

use srdesk_core::user::{LoginRequest, RegisterRequest, TokenPair, User};

use crate::error::ClientResult;
use crate::transport::ApiClient;

/// Wrapper for `/auth/*` and `/users/me`.
#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Log in, store the token pair in the shared session, and fetch
    /// the authenticated user.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<User> {
        let tokens: TokenPair = self
            .client
            .post(
                "/auth/login",
                &LoginRequest {
                    username: username.to_string(),
                    password: password.to_string(),
                },
            )
            .await?;
        self.client.session().set_tokens(tokens);

        let user = self.me().await?;
        tracing::info!(user = %user.username, "Logged in");
        Ok(user)
    }

    /// Create a new account. Does not log in.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        self.client.post("/auth/register", request).await
    }

    /// Fetch the authenticated user and record it in the session.
    pub async fn me(&self) -> ClientResult<User> {
        let user: User = self.client.get("/users/me").await?;
        self.client.session().set_user(user.clone());
        Ok(user)
    }

    /// Invalidate the refresh token server-side and clear the local
    /// session. The session is cleared even if the server call fails.
    pub async fn logout(&self) -> ClientResult<()> {
        let result = self.client.post_unit("/auth/logout").await;
        self.client.session().clear();
        result
    }
}
