//! Seat-inventory load simulation: many clients booking, cancelling and
//! querying a fixed set of trains, throttled by a global admission gate.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod feed;
pub mod gate;
pub mod ledger;
pub mod model;
pub mod observability;
pub mod pool;
pub mod sampler;
pub mod worker;

pub use config::SimConfig;
pub use coordinator::{Report, Simulation};
pub use error::SimError;
pub use gate::{AdmissionGate, GatePermit};
pub use pool::{ResourcePool, Train, TrainSnapshot};
pub use worker::{SimContext, Worker, WorkerSummary};
