//! Tokio-backed tick source for the turn clock.

use passplay_tictactoe::{TickHandle, TickScheduler};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, instrument};

/// Spawns one interval task per scheduled handle.
///
/// Every tick is sent down the channel tagged with its handle; the UI loop
/// hands it back to the clock, which drops ticks from cancelled handles.
/// Must be used inside a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    next_id: u64,
    tasks: HashMap<TickHandle, JoinHandle<()>>,
    tick_tx: mpsc::UnboundedSender<TickHandle>,
}

impl TokioScheduler {
    /// Creates a scheduler sending ticks to `tick_tx`.
    pub fn new(tick_tx: mpsc::UnboundedSender<TickHandle>) -> Self {
        Self {
            next_id: 0,
            tasks: HashMap::new(),
            tick_tx,
        }
    }

    /// Number of interval tasks still alive.
    pub fn live_tasks(&self) -> usize {
        self.tasks.len()
    }
}

impl TickScheduler for TokioScheduler {
    #[instrument(skip(self))]
    fn schedule(&mut self, interval: Duration) -> TickHandle {
        let handle = TickHandle::new(self.next_id);
        self.next_id += 1;

        let tx = self.tick_tx.clone();
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(handle).is_err() {
                    break;
                }
            }
        });

        debug!(%handle, "Interval task spawned");
        self.tasks.insert(handle, task);
        handle
    }

    #[instrument(skip(self))]
    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            debug!(%handle, "Interval task aborted");
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_ticks_are_tagged_with_handle() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx);

        let handle = scheduler.schedule(Duration::from_millis(5));
        let tick = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("tick before timeout");

        assert_eq!(tick, Some(handle));
        assert_eq!(scheduler.live_tasks(), 1);
    }

    #[tokio::test]
    async fn test_cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx);

        let handle = scheduler.schedule(Duration::from_millis(5));
        timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("tick before timeout");
        scheduler.cancel(handle);
        while rx.try_recv().is_ok() {}

        assert_eq!(scheduler.live_tasks(), 0);
        assert!(timeout(Duration::from_millis(50), rx.recv()).await.is_err());
    }

    #[tokio::test]
    async fn test_handles_are_unique() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx);
        let first = scheduler.schedule(Duration::from_secs(1));
        let second = scheduler.schedule(Duration::from_secs(1));
        assert_ne!(first, second);
        scheduler.cancel(first);
        assert_eq!(scheduler.live_tasks(), 1);
    }
}
