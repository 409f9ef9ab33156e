//! Client configuration loaded from environment variables.

/// Connection settings for [`crate::ApiClient`].
///
/// All fields have defaults suitable for local development; override
/// via environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base API URL including the `/api` prefix, no trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `SRDESK_API_URL`       | `http://localhost:8080/api` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("SRDESK_API_URL").unwrap_or_else(|_| "http://localhost:8080/api".into());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self::new(base_url, request_timeout_secs)
    }

    /// Build a config for an explicit base URL; a trailing slash is
    /// stripped so path joins stay predictable.
    pub fn new(base_url: impl Into<String>, request_timeout_secs: u64) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            request_timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("http://localhost:8080/api/", 30);
        assert_eq!(config.base_url, "http://localhost:8080/api");
    }
}
