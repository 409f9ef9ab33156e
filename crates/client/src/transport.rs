//! Authenticated HTTP transport.
//!
//! Every request attaches the current access token as a bearer header.
//! A `401` response triggers exactly one transparent refresh via
//! `POST /auth/refresh` followed by a single retry of the original
//! request; if the refresh fails the session is cleared and
//! [`ClientError::SessionExpired`] is returned so the caller can route
//! the user back to login. No other status is retried.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use srdesk_core::user::RefreshRequest;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    session: Session,
    /// Serializes concurrent refresh attempts; each waiter retries
    /// with whatever token pair is current once it acquires the lock.
    refresh_gate: tokio::sync::Mutex<()>,
}

/// Shared HTTP client for the SR-management API.
///
/// Cheap to clone; clones share the session and connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: config.base_url.clone(),
                session: Session::new(),
                refresh_gate: tokio::sync::Mutex::new(()),
            }),
        })
    }

    /// The shared session (tokens + authenticated user).
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Base API URL, no trailing slash.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    // ---- request helpers used by the service wrappers ----

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(|| self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        self.execute(|| self.request(Method::GET, path).query(query))
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(|| self.request(Method::POST, path).json(body))
            .await
    }

    /// POST with an empty body, JSON response.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(|| self.request(Method::POST, path)).await
    }

    /// POST a multipart form. The closure builds a fresh form per
    /// attempt since forms cannot be reused across a refresh retry.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: impl Fn() -> reqwest::multipart::Form,
    ) -> ClientResult<T> {
        self.execute(|| self.request(Method::POST, path).multipart(form()))
            .await
    }

    /// GET a binary body (file downloads).
    pub(crate) async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>> {
        let response = self
            .send_with_refresh(&|| self.request(Method::GET, path))
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// POST with an empty body, response body ignored.
    pub(crate) async fn post_unit(&self, path: &str) -> ClientResult<()> {
        self.send_with_refresh(&|| self.request(Method::POST, path))
            .await?;
        Ok(())
    }

    /// POST with an empty body, plain-text response.
    pub(crate) async fn post_text(&self, path: &str) -> ClientResult<String> {
        let response = self
            .send_with_refresh(&|| self.request(Method::POST, path))
            .await?;
        Ok(response.text().await?)
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(|| self.request(Method::PUT, path).json(body))
            .await
    }

    pub(crate) async fn put_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<()> {
        self.send_with_refresh(&|| self.request(Method::PUT, path).json(body))
            .await?;
        Ok(())
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(|| self.request(Method::PATCH, path).json(body))
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send_with_refresh(&|| self.request(Method::DELETE, path))
            .await?;
        Ok(())
    }

    // ---- internals ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.inner
            .http
            .request(method, format!("{}{}", self.inner.base_url, path))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        build: impl Fn() -> RequestBuilder,
    ) -> ClientResult<T> {
        let response = self.send_with_refresh(&build).await?;
        Ok(response.json::<T>().await?)
    }

    /// Send with bearer auth; on 401, refresh once and retry once.
    async fn send_with_refresh(
        &self,
        build: &impl Fn() -> RequestBuilder,
    ) -> ClientResult<Response> {
        let response = self.authorize(build()).send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check(response).await;
        }

        tracing::debug!("Received 401, attempting token refresh");
        self.refresh_tokens().await?;

        let retried = self.authorize(build()).send().await?;
        Self::check(retried).await
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.inner.session.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map non-2xx responses to [`ClientError::Api`], extracting the
    /// conventional `{ "message": … }` body when present.
    async fn check(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Exchange the refresh token for a new pair. Any failure clears
    /// the session and surfaces `SessionExpired`.
    async fn refresh_tokens(&self) -> ClientResult<()> {
        let stale = self.inner.session.access_token();
        let _gate = self.inner.refresh_gate.lock().await;

        // Another caller may have rotated the pair while we waited.
        if self.inner.session.access_token() != stale {
            return Ok(());
        }

        let Some(refresh_token) = self.inner.session.refresh_token() else {
            self.inner.session.clear();
            return Err(ClientError::SessionExpired);
        };

        let result = self
            .inner
            .http
            .post(format!("{}/auth/refresh", self.inner.base_url))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                let tokens = response.json().await.map_err(ClientError::Http)?;
                self.inner.session.set_tokens(tokens);
                tracing::debug!("Access token refreshed");
                Ok(())
            }
            Ok(response) => {
                tracing::warn!(
                    status = response.status().as_u16(),
                    "Token refresh rejected; clearing session",
                );
                self.inner.session.clear();
                Err(ClientError::SessionExpired)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh request failed; clearing session");
                self.inner.session.clear();
                Err(ClientError::SessionExpired)
            }
        }
    }
}
