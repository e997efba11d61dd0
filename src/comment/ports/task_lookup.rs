//! Port resolving the task that owns a comment.

use crate::comment::domain::{TaskId, TrackedTask};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task lookup operations.
pub type TaskLookupResult<T> = Result<T, TaskLookupError>;

/// Read-only access to tasks and their external tracking fields.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskLookup: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> TaskLookupResult<Option<TrackedTask>>;
}

/// Errors returned by task lookup implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskLookupError {
    /// Persistence-layer failure.
    #[error("task lookup failed: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskLookupError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
