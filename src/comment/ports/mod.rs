//! Port contracts for comment persistence and synchronization.
//!
//! Ports define infrastructure-agnostic interfaces used by comment services.

pub mod provider;
pub mod repository;
pub mod task_lookup;
pub mod transport;

pub use provider::{CommentSyncError, CommentSyncProvider, CommentSyncResult};
pub use repository::{CommentRepository, CommentRepositoryError, CommentRepositoryResult};
pub use task_lookup::{TaskLookup, TaskLookupError, TaskLookupResult};
pub use transport::{
    HttpAuth, HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError,
    TransportResult,
};

#[cfg(test)]
pub use provider::MockCommentSyncProvider;
#[cfg(test)]
pub use repository::MockCommentRepository;
#[cfg(test)]
pub use task_lookup::MockTaskLookup;
#[cfg(test)]
pub use transport::MockHttpTransport;
