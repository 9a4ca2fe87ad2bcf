use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::ledger::Tally;
use crate::model::TrainId;
use crate::pool::TrainSnapshot;
use crate::worker::WorkerSummary;

/// Final state of a run, read after every worker has joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub trains: Vec<TrainSnapshot>,
    /// Indexed like `trains`.
    pub tallies: Vec<Tally>,
    pub workers: Vec<WorkerSummary>,
    pub total_operations: u64,
    pub gate_limit: usize,
    /// Highest admitted count the gate itself recorded.
    pub gate_peak: usize,
    /// Highest admitted count the periodic sampler saw.
    pub sampled_peak: usize,
    /// Number of sampler ticks behind `sampled_peak`.
    pub samples: u64,
}

impl Report {
    /// Trains whose final seat count disagrees with the booked-minus-cancelled
    /// seats in the ledger. Empty on a correct run.
    pub fn conservation_violations(&self) -> Vec<TrainId> {
        self.trains
            .iter()
            .zip(&self.tallies)
            .filter(|(snap, tally)| {
                let held = i64::from(snap.capacity) - i64::from(snap.available);
                snap.available > snap.capacity || tally.net_seats() != held
            })
            .map(|(snap, _)| snap.train)
            .collect()
    }

    /// Fails if the gate ever admitted more than its limit or any train's
    /// seats do not add up.
    pub fn check_invariants(&self) -> Result<(), SimError> {
        let peak = self.gate_peak.max(self.sampled_peak);
        if peak > self.gate_limit {
            return Err(SimError::Invariant(format!(
                "gate peak {peak} above limit {}",
                self.gate_limit
            )));
        }
        let violations = self.conservation_violations();
        if !violations.is_empty() {
            return Err(SimError::Invariant(format!(
                "seat totals disagree with ledger on trains {violations:?}"
            )));
        }
        Ok(())
    }

    pub fn render_chart(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "--- Final Reservation Chart ---");
        let _ = writeln!(
            out,
            "{:>12}  {:>15}  {:>8}  {:>8}",
            "Train", "Available Seats", "Booked", "Ops"
        );
        for (snap, tally) in self.trains.iter().zip(&self.tallies) {
            let _ = writeln!(
                out,
                "{:>12}  {:>15}  {:>8}  {:>8}",
                snap.train,
                snap.available,
                snap.capacity.saturating_sub(snap.available),
                tally.operations()
            );
        }
        let _ = writeln!(
            out,
            "{} operations by {} workers, gate peak {}/{} ({} samples, sampled peak {})",
            self.total_operations,
            self.workers.len(),
            self.gate_peak,
            self.gate_limit,
            self.samples,
            self.sampled_peak
        );
        out
    }

    pub fn write_json(&self, path: &Path) -> Result<(), SimError> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| SimError::Report(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| SimError::Report(format!("{}: {e}", path.display())))
    }
}
