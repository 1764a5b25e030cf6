//! Debounced commit scheduling for editor boundaries.
//!
//! Editors call [`CommitScheduler::schedule`] on every keystroke; the
//! scheduler holds at most one pending payload and forwards it to the sink
//! only after the inactivity window elapses, so rapid edits coalesce into
//! a single commit. The commit path itself stays agnostic to cadence --
//! this component is the only place debounce policy lives.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Debounces content payloads into a commit sink.
///
/// A later [`schedule`](Self::schedule) supersedes an earlier pending
/// payload; [`flush`](Self::flush) forwards a pending payload immediately;
/// [`cancel`](Self::cancel) drops it.
pub struct CommitScheduler<F> {
    delay: Duration,
    sink: Arc<F>,
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    pending: Option<String>,
    /// Bumped on every schedule/flush/cancel; an armed timer only fires if
    /// its generation is still current.
    generation: u64,
}

impl<F> Clone for CommitScheduler<F> {
    fn clone(&self) -> Self {
        Self {
            delay: self.delay,
            sink: Arc::clone(&self.sink),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F, Fut> CommitScheduler<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send,
{
    pub fn new(delay: Duration, sink: F) -> Self {
        Self {
            delay,
            sink: Arc::new(sink),
            inner: Arc::new(Mutex::new(Inner {
                pending: None,
                generation: 0,
            })),
        }
    }

    /// Record `content` as the pending payload and re-arm the inactivity
    /// timer. Any previously armed timer is invalidated.
    pub fn schedule(&self, content: String) {
        let generation = {
            let mut inner = self.inner.lock().expect("scheduler lock poisoned");
            inner.generation += 1;
            inner.pending = Some(content);
            inner.generation
        };

        let delay = self.delay;
        let sink = Arc::clone(&self.sink);
        let state = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let payload = {
                let mut inner = state.lock().expect("scheduler lock poisoned");
                if inner.generation != generation {
                    return;
                }
                inner.pending.take()
            };
            if let Some(content) = payload {
                sink(content).await;
            }
        });
    }

    /// Forward the pending payload to the sink now, if there is one.
    pub async fn flush(&self) {
        let payload = {
            let mut inner = self.inner.lock().expect("scheduler lock poisoned");
            inner.generation += 1;
            inner.pending.take()
        };
        if let Some(content) = payload {
            (self.sink)(content).await;
        }
    }

    /// Drop the pending payload without committing it.
    pub fn cancel(&self) {
        let mut inner = self.inner.lock().expect("scheduler lock poisoned");
        inner.generation += 1;
        inner.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.inner
            .lock()
            .expect("scheduler lock poisoned")
            .pending
            .is_some()
    }
}
