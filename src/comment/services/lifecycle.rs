//! Service layer for comment creation, editing, removal and listing.

use crate::comment::{
    domain::{
        Comment, CommentDomainError, CommentId, CommentStatus, CommentableRef, NewComment,
        SyncAction,
    },
    ports::{CommentRepository, CommentRepositoryError, TaskLookup, TaskLookupError},
    services::{CommentSyncService, ProviderRegistry, SyncOutcome},
};
use mockable::Clock;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a comment.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCommentRequest {
    commentable: CommentableRef,
    content: String,
    parent_id: Option<CommentId>,
    author_id: Option<String>,
    metadata: Map<String, Value>,
}

impl CreateCommentRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(commentable: CommentableRef, content: impl Into<String>) -> Self {
        Self {
            commentable,
            content: content.into(),
            parent_id: None,
            author_id: None,
            metadata: Map::new(),
        }
    }

    /// Makes the comment a reply to `parent_id`.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: CommentId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the author identifier.
    #[must_use]
    pub fn with_author(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = Some(author_id.into());
        self
    }

    /// Sets free-form metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Request payload for editing a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommentRequest {
    content: String,
}

impl UpdateCommentRequest {
    /// Creates a request replacing the comment body.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Service-level errors for comment lifecycle operations.
///
/// Only local failures appear here; synchronization problems are reported
/// through [`SyncOutcome`].
#[derive(Debug, Error)]
pub enum CommentLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CommentDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CommentRepositoryError),
    /// The owning task could not be read.
    #[error(transparent)]
    TaskLookup(#[from] TaskLookupError),
    /// The entity the comment is attached to does not exist.
    #[error("commentable not found: {0}")]
    CommentableNotFound(CommentableRef),
    /// The comment to edit does not exist.
    #[error("comment not found: {0}")]
    NotFound(CommentId),
    /// The parent of a reply does not exist.
    #[error("parent comment not found: {0}")]
    ParentNotFound(CommentId),
    /// The parent of a reply belongs to a different entity.
    #[error("parent comment {0} belongs to a different entity")]
    ParentOwnerMismatch(CommentId),
}

/// Result type for comment lifecycle service operations.
pub type CommentLifecycleResult<T> = Result<T, CommentLifecycleError>;

/// Locally persisted comment plus what happened remotely.
#[derive(Debug, Clone)]
pub struct CommentMutation {
    /// Comment as stored locally after the operation.
    pub comment: Comment,
    /// Synchronization result.
    pub sync: SyncOutcome,
}

/// Result of a delete.
#[derive(Debug, Clone)]
pub struct CommentDeletion {
    /// `false` when no comment was stored under the identifier.
    pub deleted: bool,
    /// Synchronization result.
    pub sync: SyncOutcome,
}

/// Top-level comment with its replies.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentThread {
    /// Top-level comment.
    pub comment: Comment,
    /// Direct replies of any status, oldest first.
    pub replies: Vec<Comment>,
}

/// Comment lifecycle orchestration service.
///
/// Every mutation is applied locally first. Synchronization runs afterwards
/// and never changes whether the local operation succeeded.
#[derive(Clone)]
pub struct CommentLifecycleService<R, L, C>
where
    R: CommentRepository,
    L: TaskLookup,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    tasks: Arc<L>,
    sync: CommentSyncService<R, L, C>,
    clock: Arc<C>,
}

impl<R, L, C> CommentLifecycleService<R, L, C>
where
    R: CommentRepository,
    L: TaskLookup,
    C: Clock + Send + Sync,
{
    /// Creates a new comment lifecycle service.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        tasks: Arc<L>,
        registry: ProviderRegistry,
        clock: Arc<C>,
    ) -> Self {
        let sync = CommentSyncService::new(
            Arc::clone(&repository),
            Arc::clone(&tasks),
            registry,
            Arc::clone(&clock),
        );
        Self {
            repository,
            tasks,
            sync,
            clock,
        }
    }

    /// Returns the underlying sync service.
    #[must_use]
    pub const fn sync_service(&self) -> &CommentSyncService<R, L, C> {
        &self.sync
    }

    /// Creates a comment and mirrors it to the owning task's issue.
    ///
    /// # Errors
    ///
    /// Returns [`CommentLifecycleError::CommentableNotFound`] when the owning
    /// task does not exist, and other [`CommentLifecycleError`] variants when
    /// validation fails, the parent comment is missing or belongs elsewhere,
    /// or the repository rejects persistence.
    pub async fn create(
        &self,
        request: CreateCommentRequest,
    ) -> CommentLifecycleResult<CommentMutation> {
        if let Some(task_id) = request.commentable.owning_task() {
            let Some(_) = self.tasks.find_task(task_id).await? else {
                return Err(CommentLifecycleError::CommentableNotFound(
                    request.commentable,
                ));
            };
        }
        if let Some(parent_id) = request.parent_id {
            let parent = self
                .repository
                .find_by_id(parent_id)
                .await?
                .ok_or(CommentLifecycleError::ParentNotFound(parent_id))?;
            if parent.commentable() != &request.commentable {
                return Err(CommentLifecycleError::ParentOwnerMismatch(parent_id));
            }
        }

        let mut comment = Comment::new(
            NewComment {
                content: request.content,
                commentable: request.commentable,
                parent_id: request.parent_id,
                author_id: request.author_id,
                metadata: request.metadata,
            },
            &*self.clock,
        )?;
        self.repository.store(&comment).await?;

        let sync = self.sync.sync(&mut comment, SyncAction::Create).await;
        Ok(CommentMutation { comment, sync })
    }

    /// Replaces a comment's content and mirrors the edit.
    ///
    /// A comment that was never mirrored is created remotely instead.
    ///
    /// # Errors
    ///
    /// Returns [`CommentLifecycleError::NotFound`] for unknown comments and
    /// other [`CommentLifecycleError`] variants for validation or persistence
    /// failures.
    pub async fn update(
        &self,
        id: CommentId,
        request: UpdateCommentRequest,
    ) -> CommentLifecycleResult<CommentMutation> {
        let mut comment = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(CommentLifecycleError::NotFound(id))?;
        comment.edit_content(request.content, &*self.clock)?;
        self.repository.update(&comment).await?;

        let sync = self.sync.sync(&mut comment, SyncAction::Update).await;
        Ok(CommentMutation { comment, sync })
    }

    /// Removes a comment locally, then remotely.
    ///
    /// Deleting an unknown comment is not an error: it reports
    /// `deleted: false` and makes no remote call.
    ///
    /// # Errors
    ///
    /// Returns [`CommentLifecycleError::Repository`] when the repository
    /// fails.
    pub async fn delete(&self, id: CommentId) -> CommentLifecycleResult<CommentDeletion> {
        let Some(mut comment) = self.repository.find_by_id(id).await? else {
            return Ok(CommentDeletion {
                deleted: false,
                sync: SyncOutcome::NotApplicable,
            });
        };
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Ok(CommentDeletion {
                deleted,
                sync: SyncOutcome::NotApplicable,
            });
        }

        let sync = self.sync.sync(&mut comment, SyncAction::Delete).await;
        Ok(CommentDeletion { deleted, sync })
    }

    /// Retrieves a comment by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CommentLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: CommentId) -> CommentLifecycleResult<Option<Comment>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists active top-level comments for an entity, newest first, each with
    /// all of its replies oldest first.
    ///
    /// Reply status is not filtered; only top-level comments are hidden.
    ///
    /// # Errors
    ///
    /// Returns [`CommentLifecycleError::Repository`] when lookup fails.
    pub async fn list_threads(
        &self,
        commentable: &CommentableRef,
    ) -> CommentLifecycleResult<Vec<CommentThread>> {
        let comments = self.repository.list_for_commentable(commentable).await?;
        let (candidates, replies): (Vec<Comment>, Vec<Comment>) =
            comments.into_iter().partition(Comment::is_top_level);
        let mut top_level: Vec<Comment> = candidates
            .into_iter()
            .filter(|comment| comment.status() == CommentStatus::Active)
            .collect();

        top_level.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        let threads = top_level
            .into_iter()
            .map(|comment| {
                let mut thread_replies: Vec<Comment> = replies
                    .iter()
                    .filter(|reply| reply.parent_id() == Some(comment.id()))
                    .cloned()
                    .collect();
                thread_replies.sort_by_key(Comment::created_at);
                CommentThread {
                    comment,
                    replies: thread_replies,
                }
            })
            .collect();
        Ok(threads)
    }
}
