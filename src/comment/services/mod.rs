//! Application services for comment lifecycle and synchronization.

mod lifecycle;
mod sync;

pub use lifecycle::{
    CommentDeletion, CommentLifecycleError, CommentLifecycleResult, CommentLifecycleService,
    CommentMutation, CommentThread, CreateCommentRequest, UpdateCommentRequest,
};
pub use sync::{CommentSyncService, ProviderRegistry, SyncOutcome};
