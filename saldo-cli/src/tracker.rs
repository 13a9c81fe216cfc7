//! Single-owner task serializing all registry mutations.

use saldo_core::BalanceUpdate;
use saldo_registry::{Applied, Registry, SinkError, TotalSink};
use tokio::sync::mpsc;
use tracing::debug;

/// Buffered deliveries awaiting application.
const CHANNEL_CAPACITY: usize = 64;

/// Messages accepted by the tracker task.
#[derive(Debug)]
pub enum TrackerMessage {
    /// Balance change extracted from a statement notification.
    Update(BalanceUpdate),
    /// Delivery that carried no balance change; republish only.
    Touch,
    /// Fresh snapshot from a periodic re-sync.
    Resync(Vec<BalanceUpdate>),
}

/// Sole owner of the registry and the sink. Handlers reach it only through
/// the channel, so concurrent deliveries cannot interleave on shared state.
pub struct Tracker {
    registry: Registry,
    sink: TotalSink,
    rx: mpsc::Receiver<TrackerMessage>,
}

impl Tracker {
    pub fn new(registry: Registry, sink: TotalSink) -> (Self, mpsc::Sender<TrackerMessage>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (
            Self {
                registry,
                sink,
                rx,
            },
            tx,
        )
    }

    /// Drain messages until every sender is gone. The total is republished
    /// after every message, bounding sink staleness by the delivery interval
    /// rather than by change detection. A failed write ends the loop with
    /// the error.
    pub async fn run(mut self) -> Result<(), SinkError> {
        while let Some(message) = self.rx.recv().await {
            match message {
                TrackerMessage::Update(update) => self.apply(&update),
                TrackerMessage::Touch => {}
                TrackerMessage::Resync(updates) => {
                    debug!(count = updates.len(), "applying re-synced snapshot");
                    for update in &updates {
                        self.apply(update);
                    }
                }
            }
            self.sink.publish(self.registry.total())?;
        }
        Ok(())
    }

    fn apply(&mut self, update: &BalanceUpdate) {
        if self.registry.apply(update) == Applied::Ignored {
            debug!(id = %update.id, "update for untracked id ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saldo_core::TrackedBalance;

    fn update(id: &str, balance: i64) -> BalanceUpdate {
        BalanceUpdate {
            id: id.into(),
            balance,
        }
    }

    #[tokio::test]
    async fn republishes_after_every_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("total");
        let registry = Registry::seed(vec![TrackedBalance::new("a", 1000)]).unwrap();
        let (tracker, tx) = Tracker::new(registry, TotalSink::new(&path));
        let handle = tokio::spawn(tracker.run());

        tx.send(TrackerMessage::Update(update("a", 2000)))
            .await
            .unwrap();
        tx.send(TrackerMessage::Touch).await.unwrap();
        drop(tx);
        handle.await.unwrap().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "20\n");
    }

    #[tokio::test]
    async fn resync_touches_tracked_ids_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("total");
        let registry = Registry::seed(vec![
            TrackedBalance::new("a", 1000),
            TrackedBalance::new("b", 500),
        ])
        .unwrap();
        let (tracker, tx) = Tracker::new(registry, TotalSink::new(&path));
        let handle = tokio::spawn(tracker.run());

        tx.send(TrackerMessage::Resync(vec![
            update("a", 100),
            update("z", 900_000),
        ]))
        .await
        .unwrap();
        drop(tx);
        handle.await.unwrap().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "6\n");
    }

    #[tokio::test]
    async fn sink_failure_stops_the_tracker() {
        let dir = tempfile::tempdir().unwrap();
        // Writing to a directory path fails on every platform.
        let registry = Registry::seed(vec![TrackedBalance::new("a", 1000)]).unwrap();
        let (tracker, tx) = Tracker::new(registry, TotalSink::new(dir.path()));
        let handle = tokio::spawn(tracker.run());

        tx.send(TrackerMessage::Touch).await.unwrap();
        let result = handle.await.unwrap();
        assert!(matches!(result, Err(SinkError::Write { .. })));
    }
}
