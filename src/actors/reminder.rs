//! Reminder actor scanning the due window.
//!
//! The logic thread publishes a probe snapshot (incomplete tasks with a
//! reminder set) into shared state whenever reminders change; the actor
//! re-reads it every tick and alerts for each probe inside the window.
//! Alerts are not deduplicated across ticks.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, RwLock};
use tokio_util::sync::CancellationToken;

use crate::core::reminder::{due_probes, ReminderProbe};
use crate::tea::Message;
use crate::{dlog_debug, dlog_trace};

use super::ActorHandle;

const REMINDER_INTERVAL: Duration = Duration::from_secs(30);

/// Actor that periodically checks reminder probes against the clock.
pub struct ReminderActor {
    msg_tx: mpsc::UnboundedSender<Message>,
    probes: Arc<RwLock<Vec<ReminderProbe>>>,
    interval: Duration,
}

impl ReminderActor {
    pub fn new(
        msg_tx: mpsc::UnboundedSender<Message>,
        probes: Arc<RwLock<Vec<ReminderProbe>>>,
    ) -> Self {
        Self {
            msg_tx,
            probes,
            interval: REMINDER_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn spawn(self) -> ActorHandle {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        dlog_debug!("ReminderActor::spawn interval={:?}", self.interval);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);

            loop {
                tokio::select! {
                    _ = cancel_clone.cancelled() => {
                        dlog_debug!("ReminderActor cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        if self.msg_tx.is_closed() {
                            dlog_debug!("ReminderActor: message channel closed");
                            break;
                        }

                        let snapshot = self.probes.read().await.clone();
                        if snapshot.is_empty() {
                            continue;
                        }
                        dlog_trace!("ReminderActor: scanning {} probes", snapshot.len());

                        for probe in due_probes(&snapshot, Utc::now()) {
                            let _ = self.msg_tx.send(Message::ReminderDue {
                                task_id: probe.task_id,
                                title: probe.title,
                            });
                        }
                    }
                }
            }
        });

        ActorHandle::new(cancel)
    }
}
