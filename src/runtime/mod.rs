//! Tokio driver for views with deferred work.
//!
//! A [`ViewDriver`] owns a view behind a `parking_lot::Mutex` and a
//! background task that sleeps until the view's next due time, then calls
//! [`ViewClock::advance`]. Callers change the view through
//! [`ViewDriver::update`], which wakes the task so newly scheduled work is
//! picked up. Dropping the driver aborts the task; whatever was still
//! pending never fires.

use homehelp_core::ViewClock;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// A mounted view plus the task advancing it.
pub struct ViewDriver<V> {
    view: Arc<Mutex<V>>,
    mounted_at: Instant,
    wake: Arc<Notify>,
    fired: watch::Receiver<u64>,
    task: JoinHandle<()>,
}

impl<V: ViewClock + Send + 'static> ViewDriver<V> {
    /// Mount `view` now. Must be called inside a tokio runtime.
    pub fn mount(view: V) -> Self {
        let view = Arc::new(Mutex::new(view));
        let mounted_at = Instant::now();
        let wake = Arc::new(Notify::new());
        let (fired_tx, fired) = watch::channel(0u64);

        let task = tokio::spawn(drive(
            Arc::clone(&view),
            mounted_at,
            Arc::clone(&wake),
            fired_tx,
        ));

        Self {
            view,
            mounted_at,
            wake,
            fired,
            task,
        }
    }

    /// Time since the view was mounted.
    pub fn elapsed(&self) -> Duration {
        self.mounted_at.elapsed()
    }

    /// Run `f` on the view with the current elapsed time, then wake the driver.
    pub fn update<T>(&self, f: impl FnOnce(&mut V, Duration) -> T) -> T {
        let now = self.elapsed();
        let result = {
            let mut view = self.view.lock();
            f(&mut view, now)
        };
        self.wake.notify_one();
        result
    }

    /// Read the view.
    pub fn with<T>(&self, f: impl FnOnce(&V) -> T) -> T {
        f(&self.view.lock())
    }

    /// Receiver bumped every time deferred tasks fire.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.fired.clone()
    }
}

impl<V> Drop for ViewDriver<V> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn drive<V: ViewClock>(
    view: Arc<Mutex<V>>,
    mounted_at: Instant,
    wake: Arc<Notify>,
    fired_tx: watch::Sender<u64>,
) {
    loop {
        // A due time past what `Instant` can hold never fires.
        let next = view.lock().next_due().and_then(|due| mounted_at.checked_add(due));
        match next {
            Some(deadline) => {
                tokio::select! {
                    _ = sleep_until(deadline) => {
                        let now = mounted_at.elapsed();
                        let count = view.lock().advance(now);
                        if count > 0 {
                            tracing::trace!(count, elapsed_ms = now.as_millis() as u64, "deferred tasks fired");
                            fired_tx.send_modify(|n| *n += count as u64);
                        }
                    }
                    _ = wake.notified() => {}
                }
            }
            None => wake.notified().await,
        }
    }
}
