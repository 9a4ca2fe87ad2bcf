use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::model::{Outcome, TrainId};

/// Per-train totals of what workers did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub inquiries: u64,
    pub bookings: u64,
    pub rejections: u64,
    pub cancellations: u64,
    pub empty_cancellations: u64,
    pub seats_booked: u64,
    pub seats_cancelled: u64,
}

impl Tally {
    pub fn operations(&self) -> u64 {
        self.inquiries
            + self.bookings
            + self.rejections
            + self.cancellations
            + self.empty_cancellations
    }

    /// Seats still held by bookings according to this tally.
    pub fn net_seats(&self) -> i64 {
        self.seats_booked as i64 - self.seats_cancelled as i64
    }

    fn record(&mut self, outcome: &Outcome) {
        match *outcome {
            Outcome::Seats { .. } => self.inquiries += 1,
            Outcome::Booked { seats, .. } => {
                self.bookings += 1;
                self.seats_booked += u64::from(seats);
            }
            Outcome::Rejected { .. } => self.rejections += 1,
            Outcome::Cancelled { seats, .. } => {
                self.cancellations += 1;
                self.seats_cancelled += u64::from(seats);
            }
            Outcome::NothingToCancel => self.empty_cancellations += 1,
        }
    }
}

/// Concurrent outcome ledger, written by workers after they leave a train.
pub struct Ledger {
    tallies: DashMap<TrainId, Tally>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            tallies: DashMap::new(),
        }
    }

    pub fn record(&self, train: TrainId, outcome: &Outcome) {
        self.tallies.entry(train).or_default().record(outcome);
    }

    pub fn tally(&self, train: TrainId) -> Tally {
        self.tallies
            .get(&train)
            .map(|e| *e.value())
            .unwrap_or_default()
    }

    /// Tallies for `0..trains`, untouched trains included.
    pub fn tallies(&self, trains: usize) -> Vec<Tally> {
        (0..trains).map(|id| self.tally(id)).collect()
    }

    pub fn total_operations(&self) -> u64 {
        self.tallies.iter().map(|e| e.value().operations()).sum()
    }
}
