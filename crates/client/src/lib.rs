//! HTTP client SDK for the SR-management service.
//!
//! Provides the authenticated transport (bearer token with transparent
//! refresh), typed wrappers for every REST area, a cancellable polling
//! subscription for long-running embedding/summary jobs, and the
//! list-view session cache with TTL and revalidation.

pub mod config;
pub mod error;
pub mod list_session;
pub mod poll;
pub mod progress;
pub mod services;
pub mod session;
pub mod transport;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use transport::ApiClient;
