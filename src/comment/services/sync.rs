//! Sync gate, provider dispatch and local reconciliation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, error, info, warn};

use crate::comment::{
    adapters::{GitHubCommentProvider, JiraCommentProvider},
    domain::{Comment, IssueProvider, SyncAction, SyncTarget},
    ports::{
        CommentRepository, CommentSyncError, CommentSyncProvider, CommentSyncResult,
        HttpTransport, TaskLookup,
    },
};
use crate::config::SyncConfig;

/// Result of one synchronization attempt.
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// The comment is not owned by a task linked to an external issue.
    NotApplicable,
    /// A remote comment was created and its id recorded locally.
    Created,
    /// The remote comment body was replaced.
    Updated,
    /// The remote comment was removed.
    Deleted,
    /// A delete was requested for a comment that was never mirrored.
    NothingToDelete,
    /// The task names a provider with no registered strategy.
    UnsupportedProvider(String),
    /// The attempt failed; the local record keeps its previous sync state.
    Failed {
        /// Action that was attempted.
        action: SyncAction,
        /// Failure reason.
        error: CommentSyncError,
    },
}

impl SyncOutcome {
    /// Returns `true` when the remote side is consistent with the action.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Created | Self::Updated | Self::Deleted | Self::NothingToDelete
        )
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&CommentSyncError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Provider strategies keyed by provider tag.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<IssueProvider, Arc<dyn CommentSyncProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry; every provider is unsupported.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the GitHub and Jira strategies over a shared transport.
    #[must_use]
    pub fn from_config<T>(transport: Arc<T>, config: &SyncConfig) -> Self
    where
        T: HttpTransport + 'static,
    {
        Self::new()
            .with_provider(Arc::new(GitHubCommentProvider::new(
                Arc::clone(&transport),
                &config.github,
            )))
            .with_provider(Arc::new(JiraCommentProvider::new(transport, &config.jira)))
    }

    /// Adds a strategy, replacing any previous one for the same tag.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn CommentSyncProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Adds a strategy in place.
    pub fn register(&mut self, provider: Arc<dyn CommentSyncProvider>) {
        self.providers.insert(provider.provider(), provider);
    }

    /// Returns the strategy for a tag.
    #[must_use]
    pub fn get(&self, provider: &IssueProvider) -> Option<&Arc<dyn CommentSyncProvider>> {
        self.providers.get(provider)
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.providers.keys().map(IssueProvider::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ProviderRegistry")
            .field("providers", &names)
            .finish()
    }
}

/// Mirrors local comment mutations to the owning task's issue tracker.
///
/// Failures never escape: they are logged and reported as
/// [`SyncOutcome::Failed`].
#[derive(Clone)]
pub struct CommentSyncService<R, L, C>
where
    R: CommentRepository,
    L: TaskLookup,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    tasks: Arc<L>,
    registry: ProviderRegistry,
    clock: Arc<C>,
}

impl<R, L, C> CommentSyncService<R, L, C>
where
    R: CommentRepository,
    L: TaskLookup,
    C: Clock + Send + Sync,
{
    /// Creates a sync service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        tasks: Arc<L>,
        registry: ProviderRegistry,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            tasks,
            registry,
            clock,
        }
    }

    /// Returns the external issue a comment should be mirrored to.
    ///
    /// `Ok(None)` means synchronization does not apply: the owner is not a
    /// task, the task is gone, or its provider, external id or external URL
    /// is blank.
    ///
    /// # Errors
    ///
    /// Returns [`CommentSyncError::TaskLookup`] when the task cannot be read.
    pub async fn sync_target_for(
        &self,
        comment: &Comment,
    ) -> CommentSyncResult<Option<SyncTarget>> {
        let Some(task_id) = comment.commentable().owning_task() else {
            return Ok(None);
        };
        let task = self.tasks.find_task(task_id).await?;
        Ok(task.and_then(|found| found.sync_target()))
    }

    /// Runs the gate and, when it passes, the provider action.
    ///
    /// On a successful create (including an update that falls back to
    /// create) or update, `comment` receives the new sync state after it has
    /// been persisted.
    pub async fn sync(&self, comment: &mut Comment, action: SyncAction) -> SyncOutcome {
        let target = match self.sync_target_for(comment).await {
            Ok(Some(target)) => target,
            Ok(None) => {
                debug!(comment_id = %comment.id(), %action, "comment sync not applicable");
                return SyncOutcome::NotApplicable;
            }
            Err(error) => return Self::failed(comment, None, action, error),
        };
        self.dispatch(&target, comment, action).await
    }

    /// Routes an action to the strategy registered for the target's
    /// provider.
    pub async fn dispatch(
        &self,
        target: &SyncTarget,
        comment: &mut Comment,
        action: SyncAction,
    ) -> SyncOutcome {
        let Some(provider) = self.registry.get(target.provider()) else {
            warn!(
                comment_id = %comment.id(),
                provider = %target.provider(),
                %action,
                "comment sync attempted with unsupported provider"
            );
            return SyncOutcome::UnsupportedProvider(target.provider().to_string());
        };

        match self.apply(provider.as_ref(), target, comment, action).await {
            Ok(outcome) => {
                info!(
                    comment_id = %comment.id(),
                    provider = %target.provider(),
                    %action,
                    outcome = ?outcome,
                    "comment synced with external system"
                );
                outcome
            }
            Err(error) => Self::failed(comment, Some(target.provider()), action, error),
        }
    }

    async fn apply(
        &self,
        provider: &dyn CommentSyncProvider,
        target: &SyncTarget,
        comment: &mut Comment,
        action: SyncAction,
    ) -> CommentSyncResult<SyncOutcome> {
        match (action, comment.external_id().cloned()) {
            (SyncAction::Create, _) | (SyncAction::Update, None) => {
                let remote = provider.create(target, comment).await?;
                let mut synced = comment.clone();
                synced.record_remote_creation(remote, &*self.clock);
                self.repository.update(&synced).await?;
                *comment = synced;
                Ok(SyncOutcome::Created)
            }
            (SyncAction::Update, Some(external_id)) => {
                provider.update(target, &external_id, comment).await?;
                let mut synced = comment.clone();
                synced.record_remote_update(&*self.clock);
                self.repository.update(&synced).await?;
                *comment = synced;
                Ok(SyncOutcome::Updated)
            }
            (SyncAction::Delete, None) => Ok(SyncOutcome::NothingToDelete),
            (SyncAction::Delete, Some(external_id)) => {
                provider.delete(target, &external_id).await?;
                Ok(SyncOutcome::Deleted)
            }
        }
    }

    fn failed(
        comment: &Comment,
        provider: Option<&IssueProvider>,
        action: SyncAction,
        error: CommentSyncError,
    ) -> SyncOutcome {
        error!(
            comment_id = %comment.id(),
            provider = provider.map(IssueProvider::as_str),
            %action,
            error = %error,
            "failed to sync comment with external system"
        );
        SyncOutcome::Failed { action, error }
    }
}
