//! Team service error types

use std::time::Duration;

/// Network result type
pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported by the team service or the request policy around it.
///
/// Display strings are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid invite code. Please check with your team lead.")]
    InvalidCode,

    #[error("This invite code has expired.")]
    ExpiredCode,

    #[error("{0}")]
    Server(String),

    #[error("Request timed out after {}s. Please try again.", .0.as_secs())]
    Timeout(Duration),

    #[error("Invite code must be 6 letters or digits, got '{0}'")]
    MalformedInviteCode(String),
}
