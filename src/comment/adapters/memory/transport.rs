//! Scripted HTTP transport that records every request.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::comment::ports::{
    HttpRequest, HttpResponse, HttpTransport, TransportError, TransportResult,
};

/// In-memory transport for deterministic sync tests.
///
/// Responses are replayed in the order they were queued. When the queue is
/// empty every request fails with a network error.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    state: Arc<Mutex<RecordingState>>,
}

#[derive(Debug, Default)]
struct RecordingState {
    requests: Vec<HttpRequest>,
    responses: VecDeque<TransportResult<HttpResponse>>,
}

impl RecordingTransport {
    /// Creates a transport with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn push_response(&self, response: HttpResponse) {
        self.push(Ok(response));
    }

    /// Queues a transport failure.
    pub fn push_failure(&self, error: TransportError) {
        self.push(Err(error));
    }

    /// Returns a copy of every request sent so far.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state
            .lock()
            .map(|state| state.requests.clone())
            .unwrap_or_default()
    }

    /// Returns the number of requests sent so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.state
            .lock()
            .map(|state| state.requests.len())
            .unwrap_or_default()
    }

    fn push(&self, entry: TransportResult<HttpResponse>) {
        if let Ok(mut state) = self.state.lock() {
            state.responses.push_back(entry);
        }
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        let mut state = self.state.lock().map_err(|err| {
            TransportError::network(std::io::Error::other(err.to_string()))
        })?;
        state.requests.push(request);
        state.responses.pop_front().unwrap_or_else(|| {
            Err(TransportError::network(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "no scripted response",
            )))
        })
    }
}
