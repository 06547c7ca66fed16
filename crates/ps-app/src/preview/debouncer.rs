use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use ps_core::RecordId;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};
use tracing::debug;

/// Per-record trailing debounce. Scheduling again for the same record
/// aborts the pending action.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Arc<Mutex<HashMap<RecordId, tokio::task::AbortHandle>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn schedule<F>(&self, id: &RecordId, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let pending = Arc::clone(&self.pending);
        let delay = self.delay;
        let key = id.clone();

        let mut guard = self.pending.lock().await;
        if let Some(existing) = guard.remove(id) {
            existing.abort();
        }

        let handle = tokio::spawn(async move {
            sleep(delay).await;
            pending.lock().await.remove(&key);
            action.await;
        });

        guard.insert(id.clone(), handle.abort_handle());
        debug!(record_id = %id, delay_ms = delay.as_millis() as u64, "debounce scheduled");
    }

    pub async fn cancel(&self, id: &RecordId) {
        if let Some(handle) = self.pending.lock().await.remove(id) {
            handle.abort();
        }
    }

    pub async fn is_pending(&self, id: &RecordId) -> bool {
        self.pending.lock().await.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn fires_once_after_quiet_period() {
        tokio::time::pause();
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let id = RecordId::from("r1");
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let fired = Arc::clone(&fired);
            debouncer
                .schedule(&id, async move {
                    fired.fetch_add(1, Ordering::SeqCst);
                })
                .await;
            tokio::time::advance(Duration::from_millis(200)).await;
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::advance(Duration::from_millis(400)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending(&id).await);
    }

    #[tokio::test]
    async fn cancel_prevents_action() {
        tokio::time::pause();
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let id = RecordId::from("r1");
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        debouncer
            .schedule(&id, async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await;
        debouncer.cancel(&id).await;

        tokio::time::advance(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
