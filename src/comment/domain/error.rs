//! Error types for comment domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain comment values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentDomainError {
    /// The comment content is empty after trimming.
    #[error("comment content must not be empty")]
    EmptyContent,

    /// The provider-assigned comment identifier is empty after trimming.
    #[error("external comment identifier must not be empty")]
    EmptyExternalCommentId,
}

/// Error returned when a task's external URL does not match the layout a
/// provider expects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {provider} URL format: {url}")]
pub struct IssueUrlError {
    /// Provider whose URL layout was expected.
    pub provider: &'static str,
    /// The rejected URL.
    pub url: String,
}

/// Error returned while parsing comment statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown comment status: {0}")]
pub struct ParseCommentStatusError(pub String);
