use rand::Rng;

use crate::model::{Op, Outcome, TrainId};

/// Seat counter of one train. Callers reach it only through the train's
/// lock in [`ResourcePool`](super::ResourcePool), so every method here runs
/// with exclusive access and never suspends.
#[derive(Debug)]
pub struct Train {
    id: TrainId,
    capacity: u32,
    available: u32,
}

impl Train {
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(id: TrainId, capacity: u32) -> Self {
        assert!(capacity > 0, "train capacity must be greater than 0");
        Self {
            id,
            capacity,
            available: capacity,
        }
    }

    pub fn id(&self) -> TrainId {
        self.id
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    pub fn booked(&self) -> u32 {
        self.capacity - self.available
    }

    pub fn inquire(&self) -> Outcome {
        Outcome::Seats {
            available: self.available,
        }
    }

    /// Take `seats` if that many are left, otherwise leave the train alone.
    ///
    /// # Panics
    ///
    /// Panics if `seats` is 0.
    pub fn book(&mut self, seats: u32) -> Outcome {
        assert!(seats > 0, "booking quantity must be greater than 0");
        if self.available < seats {
            return Outcome::Rejected {
                requested: seats,
                available: self.available,
            };
        }
        self.available -= seats;
        self.check_invariant();
        Outcome::Booked {
            seats,
            remaining: self.available,
        }
    }

    /// Return a uniformly drawn `1..=booked` seats, or nothing if the train
    /// has no bookings.
    pub fn cancel<R: Rng>(&mut self, rng: &mut R) -> Outcome {
        let booked = self.booked();
        if booked == 0 {
            return Outcome::NothingToCancel;
        }
        let seats = rng.random_range(1..=booked);
        self.available += seats;
        self.check_invariant();
        Outcome::Cancelled {
            seats,
            remaining: self.available,
        }
    }

    pub fn apply<R: Rng>(&mut self, op: Op, rng: &mut R) -> Outcome {
        match op {
            Op::Inquire => self.inquire(),
            Op::Book { seats } => self.book(seats),
            Op::Cancel => self.cancel(rng),
        }
    }

    /// A breach means two writers got into the same train at once.
    fn check_invariant(&self) {
        assert!(
            self.available <= self.capacity,
            "train {}: {} seats available exceeds capacity {}",
            self.id,
            self.available,
            self.capacity
        );
    }
}
