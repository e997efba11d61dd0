//! Comment aggregate and its external synchronization state.

use super::{
    CommentDomainError, CommentId, ExternalCommentId, ParseCommentStatusError, TaskId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Entity that owns a comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommentableRef {
    /// A task, the only owner that can be mirrored to an issue tracker.
    Task {
        /// Owning task identifier.
        id: TaskId,
    },
    /// Any other commentable entity (agents, repositories, ...).
    Other {
        /// Entity type name.
        kind: String,
        /// Entity identifier in the owner's own format.
        id: String,
    },
}

impl CommentableRef {
    /// References a task.
    #[must_use]
    pub const fn task(id: TaskId) -> Self {
        Self::Task { id }
    }

    /// References a non-task entity.
    #[must_use]
    pub fn other(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Other {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Returns the owning task, if the owner is a task.
    #[must_use]
    pub const fn owning_task(&self) -> Option<TaskId> {
        match self {
            Self::Task { id } => Some(*id),
            Self::Other { .. } => None,
        }
    }
}

impl fmt::Display for CommentableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task { id } => write!(f, "task/{id}"),
            Self::Other { kind, id } => write!(f, "{kind}/{id}"),
        }
    }
}

/// Visibility status of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStatus {
    /// Shown in comment threads.
    Active,
    /// Kept for history but hidden from threads.
    Hidden,
}

impl CommentStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Hidden => "hidden",
        }
    }
}

impl TryFrom<&str> for CommentStatus {
    type Error = ParseCommentStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "hidden" => Ok(Self::Hidden),
            _ => Err(ParseCommentStatusError(value.to_owned())),
        }
    }
}

/// Comment as returned by a provider after a successful remote create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteComment {
    /// Provider-assigned comment identifier.
    pub external_id: ExternalCommentId,
    /// Link to the comment in the provider's UI.
    pub external_url: String,
}

/// Link between a local comment and its remote mirror.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSyncState {
    external_id: Option<ExternalCommentId>,
    external_url: Option<String>,
    synced_at: Option<DateTime<Utc>>,
}

impl CommentSyncState {
    /// Rebuilds sync state from persisted columns.
    #[must_use]
    pub const fn from_persisted(
        external_id: Option<ExternalCommentId>,
        external_url: Option<String>,
        synced_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            external_id,
            external_url,
            synced_at,
        }
    }

    /// Returns the remote comment identifier, if the comment was mirrored.
    #[must_use]
    pub const fn external_id(&self) -> Option<&ExternalCommentId> {
        self.external_id.as_ref()
    }

    /// Returns the remote comment URL.
    #[must_use]
    pub fn external_url(&self) -> Option<&str> {
        self.external_url.as_deref()
    }

    /// Returns the time of the last confirmed remote write.
    #[must_use]
    pub const fn synced_at(&self) -> Option<DateTime<Utc>> {
        self.synced_at
    }

    /// Returns `true` once a remote create has been confirmed.
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.external_id.is_some() && self.synced_at.is_some()
    }
}

/// Parameter object for a comment that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    /// Comment body.
    pub content: String,
    /// Owning entity.
    pub commentable: CommentableRef,
    /// Parent comment for threaded replies.
    pub parent_id: Option<CommentId>,
    /// Author identifier.
    pub author_id: Option<String>,
    /// Free-form metadata.
    pub metadata: Map<String, Value>,
}

/// Comment aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    content: String,
    commentable: CommentableRef,
    parent_id: Option<CommentId>,
    author_id: Option<String>,
    status: CommentStatus,
    metadata: Map<String, Value>,
    sync: CommentSyncState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedCommentData {
    /// Persisted comment identifier.
    pub id: CommentId,
    /// Persisted body.
    pub content: String,
    /// Persisted owner.
    pub commentable: CommentableRef,
    /// Persisted parent comment.
    pub parent_id: Option<CommentId>,
    /// Persisted author.
    pub author_id: Option<String>,
    /// Persisted status.
    pub status: CommentStatus,
    /// Persisted metadata.
    pub metadata: Map<String, Value>,
    /// Persisted sync columns.
    pub sync: CommentSyncState,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new active comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyContent`] if the content is blank.
    pub fn new(data: NewComment, clock: &impl Clock) -> Result<Self, CommentDomainError> {
        let content = validate_content(data.content)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: CommentId::new(),
            content,
            commentable: data.commentable,
            parent_id: data.parent_id,
            author_id: data.author_id,
            status: CommentStatus::Active,
            metadata: data.metadata,
            sync: CommentSyncState::default(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            content: data.content,
            commentable: data.commentable,
            parent_id: data.parent_id,
            author_id: data.author_id,
            status: data.status,
            metadata: data.metadata,
            sync: data.sync,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the comment body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the owning entity.
    #[must_use]
    pub const fn commentable(&self) -> &CommentableRef {
        &self.commentable
    }

    /// Returns the parent comment, if this is a reply.
    #[must_use]
    pub const fn parent_id(&self) -> Option<CommentId> {
        self.parent_id
    }

    /// Returns the author identifier.
    #[must_use]
    pub fn author_id(&self) -> Option<&str> {
        self.author_id.as_deref()
    }

    /// Returns the visibility status.
    #[must_use]
    pub const fn status(&self) -> CommentStatus {
        self.status
    }

    /// Returns the free-form metadata.
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Returns the remote synchronization state.
    #[must_use]
    pub const fn sync_state(&self) -> &CommentSyncState {
        &self.sync
    }

    /// Shorthand for the remote comment identifier.
    #[must_use]
    pub const fn external_id(&self) -> Option<&ExternalCommentId> {
        self.sync.external_id()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` for top-level comments.
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Replaces the comment body.
    ///
    /// Sync state is left untouched: the comment stays linked to its remote
    /// mirror until a remote update confirms the new content.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyContent`] if the content is blank.
    pub fn edit_content(
        &mut self,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), CommentDomainError> {
        self.content = validate_content(content.into())?;
        self.touch(clock);
        Ok(())
    }

    /// Changes the visibility status.
    pub fn set_status(&mut self, status: CommentStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Records a confirmed remote create.
    pub fn record_remote_creation(&mut self, remote: RemoteComment, clock: &impl Clock) {
        self.sync = CommentSyncState {
            external_id: Some(remote.external_id),
            external_url: Some(remote.external_url),
            synced_at: Some(clock.utc()),
        };
    }

    /// Records a confirmed remote update.
    pub fn record_remote_update(&mut self, clock: &impl Clock) {
        self.sync.synced_at = Some(clock.utc());
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validate_content(raw: String) -> Result<String, CommentDomainError> {
    if raw.trim().is_empty() {
        return Err(CommentDomainError::EmptyContent);
    }
    Ok(raw)
}
