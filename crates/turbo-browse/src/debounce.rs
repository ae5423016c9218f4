//! Keyed debounce timers.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

use crate::lock;

struct Pending {
    id: u64,
    handle: JoinHandle<()>,
}

/// Runs at most one task per key after a quiet period.
///
/// Scheduling under a key that already has a pending task aborts it, so only
/// the last call in a burst runs, with the last call's captured arguments.
/// Tasks run on the current tokio runtime.
#[derive(Default)]
pub struct Debouncer {
    pending: Arc<Mutex<HashMap<String, Pending>>>,
    next_id: AtomicU64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay` unless rescheduled or cancelled first.
    pub fn schedule<F>(&self, key: &str, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let pending = Arc::clone(&self.pending);
        let owned_key = key.to_string();

        let mut map = lock(&self.pending);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut map = lock(&pending);
                match map.get(&owned_key) {
                    Some(entry) if entry.id == id => {
                        map.remove(&owned_key);
                    }
                    _ => return,
                }
            }
            task.await;
        });

        if let Some(previous) = map.insert(key.to_string(), Pending { id, handle }) {
            previous.handle.abort();
            trace!(key, "debounce timer restarted");
        }
    }

    /// Cancel the pending task under `key`. Returns whether one was pending.
    pub fn cancel(&self, key: &str) -> bool {
        match lock(&self.pending).remove(key) {
            Some(entry) => {
                entry.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Cancel every pending task.
    pub fn cancel_all(&self) {
        for (_, entry) in lock(&self.pending).drain() {
            entry.handle.abort();
        }
    }

    /// Check if a task is waiting under `key`.
    pub fn is_pending(&self, key: &str) -> bool {
        lock(&self.pending).contains_key(key)
    }

    /// Number of waiting tasks.
    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("pending", &self.pending_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Box<dyn FnOnce() + Send>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let make = move |value: &str| {
            let sink = Arc::clone(&sink);
            let value = value.to_string();
            Box::new(move || lock(&sink).push(value)) as Box<dyn FnOnce() + Send>
        };
        (calls, make)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_once_with_last_arguments() {
        let debouncer = Debouncer::new();
        let (calls, make) = recorder();

        for text in ["b", "br", "bra", "brak", "brake"] {
            let record = make(text);
            debouncer.schedule("search", Duration::from_millis(300), async move { record() });
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(lock(&calls).is_empty());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(*lock(&calls), vec!["brake".to_string()]);
        assert_eq!(debouncer.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let debouncer = Debouncer::new();
        let (calls, make) = recorder();

        let url = make("url");
        let search = make("search");
        debouncer.schedule("url", Duration::from_millis(500), async move { url() });
        debouncer.schedule("search", Duration::from_millis(300), async move { search() });

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(*lock(&calls), vec!["search".to_string()]);
        assert!(debouncer.is_pending("url"));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(*lock(&calls), vec!["search".to_string(), "url".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let debouncer = Debouncer::new();
        let (calls, make) = recorder();

        let record = make("x");
        debouncer.schedule("url", Duration::from_millis(100), async move { record() });
        assert!(debouncer.cancel("url"));
        assert!(!debouncer.cancel("url"));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(lock(&calls).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending() {
        let (calls, make) = recorder();
        {
            let debouncer = Debouncer::new();
            let record = make("x");
            debouncer.schedule("url", Duration::from_millis(100), async move { record() });
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(lock(&calls).is_empty());
    }
}
