//! Read-only view of the task that owns a comment.

use super::{IssueProvider, TaskId};
use serde::{Deserialize, Serialize};

/// Task fields the synchronization workflow needs.
///
/// The task itself is owned elsewhere; this is a plain transfer object handed
/// out by a [`crate::comment::ports::TaskLookup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedTask {
    id: TaskId,
    title: String,
    provider: Option<String>,
    external_id: Option<String>,
    external_url: Option<String>,
}

impl TrackedTask {
    /// Creates a task view with no external tracking.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            provider: None,
            external_id: None,
            external_url: None,
        }
    }

    /// Links the task to an external issue.
    #[must_use]
    pub fn with_external_issue(
        mut self,
        provider: impl Into<String>,
        external_id: impl Into<String>,
        external_url: impl Into<String>,
    ) -> Self {
        self.provider = Some(provider.into());
        self.external_id = Some(external_id.into());
        self.external_url = Some(external_url.into());
        self
    }

    /// Sets the provider tag alone.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the external issue identifier alone.
    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Sets the external issue URL alone.
    #[must_use]
    pub fn with_external_url(mut self, external_url: impl Into<String>) -> Self {
        self.external_url = Some(external_url.into());
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the raw provider tag, if any.
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Returns the external issue identifier, if any.
    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    /// Returns the external issue URL, if any.
    #[must_use]
    pub fn external_url(&self) -> Option<&str> {
        self.external_url.as_deref()
    }

    /// Returns the synchronization target when the task carries a provider,
    /// an external id and an external URL, all non-blank.
    #[must_use]
    pub fn sync_target(&self) -> Option<SyncTarget> {
        let provider = non_blank(self.provider.as_deref())?;
        let external_id = non_blank(self.external_id.as_deref())?;
        let external_url = non_blank(self.external_url.as_deref())?;
        Some(SyncTarget {
            task_id: self.id,
            provider: IssueProvider::parse(provider),
            external_issue_id: external_id.to_owned(),
            external_url: external_url.to_owned(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|inner| !inner.is_empty())
}

/// External issue a comment is mirrored to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    task_id: TaskId,
    provider: IssueProvider,
    external_issue_id: String,
    external_url: String,
}

impl SyncTarget {
    /// Returns the owning task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the provider tag.
    #[must_use]
    pub const fn provider(&self) -> &IssueProvider {
        &self.provider
    }

    /// Returns the provider's issue identifier.
    #[must_use]
    pub fn external_issue_id(&self) -> &str {
        &self.external_issue_id
    }

    /// Returns the issue URL recorded on the task.
    #[must_use]
    pub fn external_url(&self) -> &str {
        &self.external_url
    }
}
