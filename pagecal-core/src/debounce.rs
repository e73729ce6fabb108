//! Cancellable delayed execution on a tokio runtime.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::{PageCalError, PageCalResult};

/// Runs only the most recently scheduled task, `delay` after it was
/// scheduled. Scheduling again before the delay elapses drops the pending
/// task.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    runtime: Handle,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Binds to the runtime of the calling context.
    pub fn new(delay: Duration) -> PageCalResult<Self> {
        let runtime = Handle::try_current().map_err(|e| PageCalError::Runtime(e.to_string()))?;
        Ok(Self::with_handle(delay, runtime))
    }

    pub fn with_handle(delay: Duration, runtime: Handle) -> Self {
        Debouncer {
            delay,
            runtime,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Drops the pending task, if any.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_requires_runtime() {
        assert!(matches!(
            Debouncer::new(Duration::from_millis(80)),
            Err(PageCalError::Runtime(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_task_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(80)).unwrap();
        let last = Arc::new(AtomicUsize::new(0));
        let runs = Arc::new(AtomicUsize::new(0));

        for value in 1..=5 {
            let last = Arc::clone(&last);
            let runs = Arc::clone(&runs);
            debouncer.schedule(move || {
                last.store(value, Ordering::SeqCst);
                runs.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 5);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let debouncer = Debouncer::new(Duration::from_millis(80)).unwrap();
        let runs = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&runs);
        debouncer.schedule(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
