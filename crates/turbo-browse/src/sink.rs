//! Address-bar writers.

use crate::lock;
use std::sync::Mutex;

/// Destination for URL updates.
///
/// `replace` must overwrite the current location without adding a history
/// entry and must not feed the URL back into the session.
pub trait UrlSink: Send + Sync {
    fn replace(&self, query: &str);
}

/// Discards URL updates.
#[derive(Debug, Default)]
pub struct NoopUrlSink;

impl UrlSink for NoopUrlSink {
    fn replace(&self, _query: &str) {}
}

/// Keeps every written URL, newest last.
#[derive(Debug, Default)]
pub struct RecordingUrlSink {
    writes: Mutex<Vec<String>>,
}

impl RecordingUrlSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last written URL.
    pub fn current(&self) -> Option<String> {
        lock(&self.writes).last().cloned()
    }

    /// All writes in order.
    pub fn writes(&self) -> Vec<String> {
        lock(&self.writes).clone()
    }
}

impl UrlSink for RecordingUrlSink {
    fn replace(&self, query: &str) {
        lock(&self.writes).push(query.to_string());
    }
}
