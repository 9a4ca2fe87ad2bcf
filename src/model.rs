use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a train in the pool, `0..trains`.
pub type TrainId = usize;

/// Identity of a simulated client.
pub type WorkerId = usize;

/// The three things a client can ask of a train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    Inquire,
    Book,
    Cancel,
}

impl OpKind {
    pub const ALL: [OpKind; 3] = [OpKind::Inquire, OpKind::Book, OpKind::Cancel];

    pub fn label(self) -> &'static str {
        match self {
            OpKind::Inquire => "inquiry",
            OpKind::Book => "booking",
            OpKind::Cancel => "cancellation",
        }
    }
}

/// Operation payload. Only bookings carry a quantity; the number of seats a
/// cancellation returns is decided by the train under its lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    Inquire,
    Book { seats: u32 },
    Cancel,
}

impl Op {
    pub fn kind(&self) -> OpKind {
        match self {
            Op::Inquire => OpKind::Inquire,
            Op::Book { .. } => OpKind::Book,
            Op::Cancel => OpKind::Cancel,
        }
    }
}

/// One iteration's worth of work for a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub train: TrainId,
    pub op: Op,
}

impl Request {
    pub fn new(train: TrainId, op: Op) -> Self {
        Self { train, op }
    }
}

/// Result of running an operation against a train. Rejections and no-op
/// cancellations are ordinary outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Inquiry answer.
    Seats { available: u32 },
    Booked { seats: u32, remaining: u32 },
    /// Not enough seats left; the train is unchanged.
    Rejected { requested: u32, available: u32 },
    Cancelled { seats: u32, remaining: u32 },
    /// Nothing was booked on the train.
    NothingToCancel,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Seats { .. } => "seats",
            Outcome::Booked { .. } => "booked",
            Outcome::Rejected { .. } => "rejected",
            Outcome::Cancelled { .. } => "cancelled",
            Outcome::NothingToCancel => "nothing_to_cancel",
        }
    }

    /// Seats taken out of (positive) or returned to (negative) the train.
    pub fn seat_delta(&self) -> i64 {
        match self {
            Outcome::Booked { seats, .. } => i64::from(*seats),
            Outcome::Cancelled { seats, .. } => -i64::from(*seats),
            _ => 0,
        }
    }
}

/// Where in the gate protocol a record was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionEvent {
    Waiting,
    Admitted,
    Completed(Outcome),
}

/// A single entry of the action stream. Records of one worker are published
/// in the order that worker performed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub worker: WorkerId,
    pub train: TrainId,
    pub kind: OpKind,
    pub event: ActionEvent,
}

impl fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (worker, train) = (self.worker, self.train);
        match self.event {
            ActionEvent::Waiting => write!(
                f,
                "worker {worker}: WAITING for system access ({} on train {train})",
                self.kind.label()
            ),
            ActionEvent::Admitted => write!(
                f,
                "worker {worker}: GAINED system access ({} on train {train})",
                self.kind.label()
            ),
            ActionEvent::Completed(Outcome::Seats { available }) => {
                write!(f, "worker {worker}: train {train} has {available} seats available")
            }
            ActionEvent::Completed(Outcome::Booked { seats, remaining }) => write!(
                f,
                "worker {worker}: booked {seats} seats on train {train}, remaining {remaining}"
            ),
            ActionEvent::Completed(Outcome::Rejected {
                requested,
                available,
            }) => write!(
                f,
                "worker {worker}: could not book {requested} on train {train}, {available} left"
            ),
            ActionEvent::Completed(Outcome::Cancelled { seats, remaining }) => write!(
                f,
                "worker {worker}: cancelled {seats} seats on train {train}, remaining {remaining}"
            ),
            ActionEvent::Completed(Outcome::NothingToCancel) => {
                write!(f, "worker {worker}: train {train} has no bookings to cancel")
            }
        }
    }
}

#[cfg(test)]
impl Outcome {
    pub(crate) fn booked(seats: u32, remaining: u32) -> Self {
        Outcome::Booked { seats, remaining }
    }

    pub(crate) fn cancelled(seats: u32, remaining: u32) -> Self {
        Outcome::Cancelled { seats, remaining }
    }

    pub(crate) fn rejected(requested: u32, available: u32) -> Self {
        Outcome::Rejected {
            requested,
            available,
        }
    }
}
