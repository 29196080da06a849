//! Error types for the hugface client.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type covering configuration, validation, transport, and
/// remote API failures.
///
/// The retry loop absorbs exactly one condition internally (a transient
/// "model loading" status, retried up to the configured budget); every other
/// failure surfaces to the caller as one of these variants, unmodified.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing configuration (unknown task with no explicit model,
    /// empty token, malformed config JSON, etc.).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller-supplied input that cannot be used (unreadable media file,
    /// missing frame column, non-string cell).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An explicit model's declared pipeline task disagrees with the
    /// requested task. Raised before any inference call is made.
    #[error("Task mismatch: {0}")]
    TaskModelMismatch(String),

    /// The remote API returned a terminal non-success status. Carries the
    /// error message extracted from the response body when one was found.
    #[error("API call failed with status {status}: {message}")]
    ApiCall {
        /// HTTP status code returned by the service.
        status: u16,
        /// Human-readable message extracted from the error body, or a
        /// generic fallback when the body had no recognizable message field.
        message: String,
    },

    /// The service answered with the transient "model loading" status on
    /// every attempt; the retry budget is exhausted.
    #[error("Service unavailable after {attempts} attempts")]
    ServiceUnavailable {
        /// Number of attempts made (equals the configured retry budget).
        attempts: u32,
    },

    /// An HTTP transport-level failure (connection refused, timeout, TLS).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service returned a success status but the body was not valid
    /// JSON, or a response was missing the field a reduction expected.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
