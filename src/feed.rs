use tokio::sync::broadcast;

use crate::model::ActionRecord;

/// Broadcast hub for the action stream.
pub struct ActionFeed {
    sender: broadcast::Sender<ActionRecord>,
}

impl ActionFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            sender: broadcast::channel(capacity).0,
        }
    }

    /// Subscribe to every record published from now on. A subscriber that
    /// falls more than `capacity` records behind sees `RecvError::Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<ActionRecord> {
        self.sender.subscribe()
    }

    /// Publish a record. No-op if nobody is listening.
    pub fn send(&self, record: ActionRecord) {
        let _ = self.sender.send(record);
    }
}
