//! In-memory task lookup.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::comment::{
    domain::{TaskId, TrackedTask},
    ports::{TaskLookup, TaskLookupError, TaskLookupResult},
};

/// Thread-safe in-memory task lookup seeded by the caller.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskLookup {
    tasks: Arc<RwLock<HashMap<TaskId, TrackedTask>>>,
}

impl InMemoryTaskLookup {
    /// Creates an empty lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLookupError::Persistence`] when lock acquisition fails.
    pub fn insert(&self, task: TrackedTask) -> TaskLookupResult<()> {
        let mut tasks = self.tasks.write().map_err(|err| {
            TaskLookupError::persistence(std::io::Error::other(err.to_string()))
        })?;
        tasks.insert(task.id(), task);
        Ok(())
    }
}

#[async_trait]
impl TaskLookup for InMemoryTaskLookup {
    async fn find_task(&self, id: TaskId) -> TaskLookupResult<Option<TrackedTask>> {
        let tasks = self.tasks.read().map_err(|err| {
            TaskLookupError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(tasks.get(&id).cloned())
    }
}
