//! Service layer error types

use erbuilds_domain::DomainError;

use crate::ports::outbound::ApiError;

/// Errors from grace and vote interactions
///
/// Every variant has already been shown to the user by the time it is
/// returned; callers only need it for logging or tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError {
    #[error("CSRF token not found on the page")]
    MissingCsrfToken,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The server answered `success: false`
    #[error("Server rejected the request: {0}")]
    Rejected(String),
}
