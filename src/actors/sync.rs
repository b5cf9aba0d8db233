//! Sync actor driving the background update cadence.
//!
//! The actor only keeps time. Each tick it emits `Message::SyncTick`;
//! the update function flips the syncing indicator and schedules the
//! apply step, so the pick-and-mutate logic stays on the logic thread
//! where the workspace lives.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::dlog_debug;
use crate::tea::Message;

use super::ActorHandle;

const SYNC_INTERVAL: Duration = Duration::from_secs(45);

/// Actor that periodically kicks off a background update cycle.
pub struct SyncActor {
    msg_tx: mpsc::UnboundedSender<Message>,
    interval: Duration,
}

impl SyncActor {
    pub fn new(msg_tx: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            msg_tx,
            interval: SYNC_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn spawn(self) -> ActorHandle {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        dlog_debug!("SyncActor::spawn interval={:?}", self.interval);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            // The first tick of a tokio interval fires immediately;
            // consume it so the first cycle lands a full period in.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = cancel_clone.cancelled() => {
                        dlog_debug!("SyncActor cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        if self.msg_tx.send(Message::SyncTick).is_err() {
                            dlog_debug!("SyncActor: message channel closed");
                            break;
                        }
                    }
                }
            }
        });

        ActorHandle::new(cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_interval_default() {
        assert_eq!(SYNC_INTERVAL, Duration::from_secs(45));
    }

    #[tokio::test]
    async fn test_sync_actor_emits_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = SyncActor::new(tx)
            .with_interval(Duration::from_millis(10))
            .spawn();

        let msg = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap();
        assert!(matches!(msg, Some(Message::SyncTick)));
        handle.shutdown();
    }

    #[tokio::test]
    async fn test_sync_actor_stops_on_shutdown() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = SyncActor::new(tx)
            .with_interval(Duration::from_millis(5))
            .spawn();

        handle.shutdown();
        assert!(handle.is_cancelled());

        // Drain anything sent before the cancel landed, then the
        // channel closes once the task exits.
        tokio::time::sleep(Duration::from_millis(30)).await;
        while rx.try_recv().is_ok() {}
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(rx.try_recv().is_err());
    }
}
