//! Domain-level error type shared by both crates.

/// Errors arising from domain rules, independent of transport.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A request failed a client-side validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A wire value did not match any known variant.
    #[error("Invalid value '{value}' for {field}")]
    InvalidValue {
        field: &'static str,
        value: String,
    },
}
