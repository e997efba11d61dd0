//! In-memory adapters for comment persistence, task lookup and HTTP.

mod comment;
mod task;
mod transport;

pub use comment::InMemoryCommentRepository;
pub use task::InMemoryTaskLookup;
pub use transport::RecordingTransport;
