use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use tracing::trace;

use crate::gate::AdmissionGate;

/// What the sampler has seen so far.
#[derive(Debug, Default)]
pub struct GateSamples {
    peak: AtomicUsize,
    count: AtomicU64,
}

impl GateSamples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    fn observe(&self, active: usize) {
        self.peak.fetch_max(active, Ordering::AcqRel);
        self.count.fetch_add(1, Ordering::AcqRel);
    }
}

/// Background task that periodically reads the gate's admitted count.
/// Runs until aborted.
pub async fn run_sampler(gate: Arc<AdmissionGate>, samples: Arc<GateSamples>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        let active = gate.active();
        assert!(
            active <= gate.limit(),
            "gate admitted {active} workers, limit is {}",
            gate.limit()
        );
        samples.observe(active);
        metrics::gauge!(crate::observability::GATE_ACTIVE).set(active as f64);
        metrics::gauge!(crate::observability::GATE_SAMPLED_PEAK).set(samples.peak() as f64);
        trace!(active, "gate sample");
    }
}
