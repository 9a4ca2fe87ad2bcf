use crate::model::{TrainId, WorkerId};

#[derive(Debug)]
pub enum SimError {
    InvalidConfig(&'static str),
    UnknownTrain(TrainId),
    WorkerPanicked { worker: WorkerId, reason: String },
    Report(String),
    /// A concurrency guarantee was observed broken.
    Invariant(String),
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            SimError::UnknownTrain(id) => write!(f, "no such train: {id}"),
            SimError::WorkerPanicked { worker, reason } => {
                write!(f, "worker {worker} did not finish: {reason}")
            }
            SimError::Report(e) => write!(f, "report error: {e}"),
            SimError::Invariant(msg) => write!(f, "invariant violated: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}
