//! Mock train information source for testing without API access.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::BoxFuture;

use super::error::OdptError;
use super::source::TrainInformationSource;

/// A canned upstream reply.
#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Status { status: u16, body: String },
}

/// Mock source that serves a fixed reply and counts calls.
///
/// Clones share the call counter, so a test can keep one handle and give
/// another to the router.
#[derive(Debug, Clone)]
pub struct MockSource {
    reply: Reply,
    calls: Arc<AtomicUsize>,
}

impl MockSource {
    /// Reply with a 2xx and the given body.
    pub fn body(body: impl Into<String>) -> Self {
        Self::new(Reply::Body(body.into()))
    }

    /// Reply with a non-success status.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::new(Reply::Status {
            status,
            body: body.into(),
        })
    }

    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times `fetch` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TrainInformationSource for MockSource {
    fn fetch(&self) -> BoxFuture<'_, Result<String, OdptError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Status { status, body } => Err(OdptError::Status {
                status: *status,
                body: body.clone(),
            }),
        };
        Box::pin(async move { result })
    }
}
