//! Strategy port for mirroring comments to an external issue tracker.

use super::{CommentRepositoryError, TaskLookupError, TransportError};
use crate::comment::domain::{
    Comment, ExternalCommentId, IssueProvider, IssueUrlError, RemoteComment, SyncTarget,
};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for provider operations.
pub type CommentSyncResult<T> = Result<T, CommentSyncError>;

/// Create/update/delete capability of one issue tracker.
///
/// Implementations only talk to the remote API. Deciding whether to sync, the
/// update-without-id fallback and writing results back to the local comment
/// are handled by [`crate::comment::services::CommentSyncService`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentSyncProvider: Send + Sync {
    /// Provider tag this strategy serves.
    fn provider(&self) -> IssueProvider;

    /// Posts a new remote comment mirroring `comment`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentSyncError`] on missing credentials, a malformed issue
    /// URL, a failed call or an unusable response.
    async fn create(
        &self,
        target: &SyncTarget,
        comment: &Comment,
    ) -> CommentSyncResult<RemoteComment>;

    /// Replaces the body of an existing remote comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentSyncError`] on missing credentials, a malformed issue
    /// URL or a failed call.
    async fn update(
        &self,
        target: &SyncTarget,
        external_id: &ExternalCommentId,
        comment: &Comment,
    ) -> CommentSyncResult<()>;

    /// Removes a remote comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentSyncError`] on missing credentials, a malformed issue
    /// URL or a failed call.
    async fn delete(
        &self,
        target: &SyncTarget,
        external_id: &ExternalCommentId,
    ) -> CommentSyncResult<()>;
}

/// Reasons a synchronization attempt failed.
#[derive(Debug, Clone, Error)]
pub enum CommentSyncError {
    /// Credentials for the provider are not configured.
    #[error("{provider} credentials not configured")]
    MissingCredentials {
        /// Provider name.
        provider: &'static str,
    },

    /// The task's external URL does not match the provider's layout.
    #[error(transparent)]
    InvalidExternalUrl(#[from] IssueUrlError),

    /// The provider answered with a non-success status.
    #[error("{provider} rejected comment {action} with status {status}: {body}")]
    RemoteStatus {
        /// Provider name.
        provider: &'static str,
        /// Action name.
        action: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The provider reported success but the body could not be used.
    #[error("{provider} returned an unusable response: {reason}")]
    MalformedResponse {
        /// Provider name.
        provider: &'static str,
        /// What was wrong with the body.
        reason: String,
    },

    /// The owning task could not be resolved.
    #[error(transparent)]
    TaskLookup(#[from] TaskLookupError),

    /// The remote write succeeded but the local record could not be updated.
    #[error("failed to record sync result locally: {0}")]
    Reconcile(#[from] CommentRepositoryError),
}

impl CommentSyncError {
    /// Returns `true` when the failure happened before any network call.
    #[must_use]
    pub const fn is_pre_flight(&self) -> bool {
        matches!(
            self,
            Self::MissingCredentials { .. } | Self::InvalidExternalUrl(_)
        )
    }
}

