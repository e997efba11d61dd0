//! In-memory comment repository for tests and local wiring.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::comment::{
    domain::{Comment, CommentId, CommentableRef},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};

/// Thread-safe in-memory comment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    state: Arc<RwLock<InMemoryCommentState>>,
}

#[derive(Debug, Default)]
struct InMemoryCommentState {
    comments: HashMap<CommentId, Comment>,
    commentable_index: HashMap<CommentableRef, Vec<CommentId>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> CommentRepositoryError {
    CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.comments.contains_key(&comment.id()) {
            return Err(CommentRepositoryError::DuplicateComment(comment.id()));
        }

        state
            .commentable_index
            .entry(comment.commentable().clone())
            .or_default()
            .push(comment.id());
        state.comments.insert(comment.id(), comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .comments
            .get_mut(&comment.id())
            .ok_or(CommentRepositoryError::NotFound(comment.id()))?;
        // The owner never changes after creation, so the index stays valid.
        *stored = comment.clone();
        Ok(())
    }

    async fn delete(&self, id: CommentId) -> CommentRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(removed) = state.comments.remove(&id) else {
            return Ok(false);
        };

        let owner = removed.commentable();
        if let Some(ids) = state.commentable_index.get_mut(owner) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                state.commentable_index.remove(owner);
            }
        }
        Ok(true)
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.comments.get(&id).cloned())
    }

    async fn list_for_commentable(
        &self,
        commentable: &CommentableRef,
    ) -> CommentRepositoryResult<Vec<Comment>> {
        let state = self.state.read().map_err(lock_error)?;
        let comments = state
            .commentable_index
            .get(commentable)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.comments.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(comments)
    }
}
