//! Admission gate bounding how many workers are inside the booking system.
//!
//! Slots are permits of a tokio [`Semaphore`] sized to the limit; parked
//! acquirers are woken in FIFO order as permits come back. `active` counts
//! workers holding a permit and is bumped only after the permit is granted,
//! so it can never pass `limit`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::SimError;

#[derive(Debug)]
pub struct AdmissionGate {
    limit: usize,
    semaphore: Arc<Semaphore>,
    /// Workers currently admitted.
    active: AtomicUsize,
    /// Highest `active` ever reached.
    peak: AtomicUsize,
}

impl AdmissionGate {
    /// # Panics
    ///
    /// Panics if `limit` is 0.
    pub fn new(limit: usize) -> Arc<Self> {
        assert!(limit > 0, "gate limit must be greater than 0");
        Arc::new(Self {
            limit,
            semaphore: Arc::new(Semaphore::new(limit)),
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        })
    }

    /// Claim a slot without waiting.
    pub fn try_acquire(self: &Arc<Self>) -> Option<GatePermit> {
        let permit = self.semaphore.clone().try_acquire_owned().ok()?;
        Some(self.admit(permit))
    }

    /// Wait until a slot is free and claim it.
    pub async fn acquire(self: &Arc<Self>) -> Result<GatePermit, SimError> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| SimError::Invariant("admission gate closed".into()))?;
        Ok(self.admit(permit))
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }

    fn admit(self: &Arc<Self>, permit: OwnedSemaphorePermit) -> GatePermit {
        let now = self.active.fetch_add(1, Ordering::AcqRel) + 1;
        assert!(
            now <= self.limit,
            "gate admitted {now} workers, limit is {}",
            self.limit
        );
        self.peak.fetch_max(now, Ordering::AcqRel);
        GatePermit {
            gate: Arc::clone(self),
            _permit: permit,
        }
    }

    fn release(&self) {
        let prev = self.active.fetch_sub(1, Ordering::AcqRel);
        assert!(prev > 0, "admission gate released more often than acquired");
    }
}

/// One admitted slot. Dropping it releases the slot exactly once, including
/// on early return or panic.
#[derive(Debug)]
pub struct GatePermit {
    gate: Arc<AdmissionGate>,
    // Dropped after `Drop::drop` runs, so `active` falls before the
    // semaphore hands the slot to the next waiter.
    _permit: OwnedSemaphorePermit,
}

impl GatePermit {
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.gate.release();
    }
}
