//! Client-side error taxonomy.

use srdesk_core::error::CoreError;

/// Errors surfaced by the SDK.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the request with a non-2xx status. The
    /// message is taken from the conventional `{ "message": … }` body
    /// when present.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication could not be restored: the access token was
    /// rejected and the refresh attempt failed. The session has been
    /// cleared; the caller must log in again.
    #[error("session expired, re-authentication required")]
    SessionExpired,

    /// A bounded polling subscription hit its iteration ceiling before
    /// the job reported a terminal status.
    #[error("timed out waiting for job completion")]
    Timeout,

    /// A background job reported failure.
    #[error("job failed: {0}")]
    JobFailed(String),

    /// A domain-level error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience alias for SDK return values.
pub type ClientResult<T> = Result<T, ClientError>;
