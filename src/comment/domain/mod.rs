//! Domain model for comments and their external issue-tracker mirrors.
//!
//! Comments are plain aggregates with no knowledge of storage or HTTP. The
//! owning task is represented by a read-only [`TrackedTask`] view.

mod adf;
mod comment;
mod error;
mod ids;
mod locator;
mod provider;
mod task;

pub use adf::{AdfBlock, AdfDocument, AdfInline};
pub use comment::{
    Comment, CommentStatus, CommentSyncState, CommentableRef, NewComment, PersistedCommentData,
    RemoteComment,
};
pub use error::{CommentDomainError, IssueUrlError, ParseCommentStatusError};
pub use ids::{CommentId, ExternalCommentId, TaskId};
pub use locator::{GITHUB_WEB_HOST, GitHubIssueLocator, JiraIssueLocator};
pub use provider::{IssueProvider, SyncAction};
pub use task::{SyncTarget, TrackedTask};
