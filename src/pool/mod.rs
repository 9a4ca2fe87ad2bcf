mod train;
#[cfg(test)]
mod tests;

pub use train::Train;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::model::TrainId;

pub type SharedTrain = Arc<Mutex<Train>>;

/// Final state of one train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainSnapshot {
    pub train: TrainId,
    pub capacity: u32,
    pub available: u32,
}

/// Fixed set of trains, each behind its own lock. The pool never locks on
/// the caller's behalf except in [`ResourcePool::snapshot`].
pub struct ResourcePool {
    trains: Vec<SharedTrain>,
}

impl ResourcePool {
    /// `count` trains, all starting fully available.
    pub fn new(count: usize, capacity: u32) -> Self {
        Self::with_capacities(std::iter::repeat_n(capacity, count))
    }

    pub fn with_capacities(capacities: impl IntoIterator<Item = u32>) -> Self {
        let trains = capacities
            .into_iter()
            .enumerate()
            .map(|(id, cap)| Arc::new(Mutex::new(Train::new(id, cap))))
            .collect();
        Self { trains }
    }

    pub fn len(&self) -> usize {
        self.trains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    pub fn get(&self, id: TrainId) -> Option<SharedTrain> {
        self.trains.get(id).cloned()
    }

    /// Lookup train, acquire its exclusive lock.
    pub async fn lock(&self, id: TrainId) -> Option<OwnedMutexGuard<Train>> {
        let train = self.get(id)?;
        Some(train.lock_owned().await)
    }

    /// Read every train in index order. Meant for after all workers have
    /// finished, when each lock is uncontended.
    pub async fn snapshot(&self) -> Vec<TrainSnapshot> {
        let mut out = Vec::with_capacity(self.trains.len());
        for train in &self.trains {
            let guard = train.lock().await;
            out.push(TrainSnapshot {
                train: guard.id(),
                capacity: guard.capacity(),
                available: guard.available(),
            });
        }
        out
    }
}
