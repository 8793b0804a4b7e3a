/*!
 * Error types for the locflow application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors produced by a translation backend for a single attempt.
///
/// The retry machinery distinguishes retryable conditions (malformed
/// responses, transport failures, rate limits) from fatal ones
/// (authentication). Fatal errors abort an agent pipeline stage; in plain
/// batch mode every variant counts as one failed attempt.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The request to the provider failed in transit
    #[error("Backend request failed: {0}")]
    Request(String),

    /// The provider answered, but the response could not be parsed
    #[error("Failed to parse backend response: {0}")]
    Parse(String),

    /// The provider returned an empty response body
    #[error("Backend returned an empty response")]
    EmptyResponse,

    /// The provider reported rate limiting
    #[error("Backend rate limited: {0}")]
    RateLimited(String),

    /// The provider rejected the credentials
    #[error("Backend authentication rejected: {0}")]
    Auth(String),
}

impl BackendError {
    /// Whether another attempt against the backend can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, BackendError::Auth(_))
    }
}

impl From<ProviderError> for BackendError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::RequestFailed(msg) => BackendError::Request(msg),
            ProviderError::ParseError(msg) => BackendError::Parse(msg),
            ProviderError::RateLimitExceeded(msg) => BackendError::RateLimited(msg),
            ProviderError::AuthenticationError(msg) => BackendError::Auth(msg),
            ProviderError::ApiError { status_code, message } => match status_code {
                401 | 403 => BackendError::Auth(format!("{} - {}", status_code, message)),
                429 => BackendError::RateLimited(message),
                _ => BackendError::Request(format!("{} - {}", status_code, message)),
            },
        }
    }
}

/// Error raised when the agent pipeline aborts a unit of work.
///
/// Deliberately distinct from per-entry failures: the whole unit is
/// abandoned, a diagnostic snapshot has been captured, and the caller must
/// not treat it as "some entries failed".
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A stage raised an unrecovered error; the snapshot id points at the
    /// captured intermediate state.
    #[error("Agent pipeline failed at stage '{stage}' (snapshot {snapshot_id}): {source}")]
    Failed {
        /// Stage that raised
        stage: &'static str,
        /// Id of the captured diagnostic snapshot
        snapshot_id: String,
        /// The triggering backend error
        #[source]
        source: BackendError,
    },
}

impl PipelineError {
    /// Stage name the failure originated from.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Failed { stage, .. } => *stage,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from a translation backend
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Error from the agent pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
