mod report;

pub use report::Report;

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::{JoinError, JoinHandle};
use tracing::info;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::model::{ActionRecord, WorkerId};
use crate::pool::TrainSnapshot;
use crate::sampler::{self, GateSamples};
use crate::worker::{SimContext, Worker, WorkerSummary};

/// Owns the pool and the gate for one run and drives the workers.
pub struct Simulation {
    config: Arc<SimConfig>,
    ctx: SimContext,
    samples: Arc<GateSamples>,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let ctx = SimContext::new(&config);
        Ok(Self {
            config: Arc::new(config),
            ctx,
            samples: Arc::new(GateSamples::new()),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    /// Action records from every worker. Subscribe before [`Simulation::run`]
    /// to see the whole stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ActionRecord> {
        self.ctx.feed.subscribe()
    }

    /// A worker bound to this run's pool and gate.
    pub fn worker(&self, id: WorkerId) -> Worker {
        Worker::new(id, self.ctx.clone(), self.config.clone())
    }

    /// Spawn every worker, wait for all of them, then read the final state.
    pub async fn run(&self) -> Result<Report, SimError> {
        info!(
            workers = self.config.workers,
            trains = self.config.trains,
            gate_limit = self.config.gate_limit,
            "starting simulation"
        );

        let sampler = tokio::spawn(sampler::run_sampler(
            self.ctx.gate.clone(),
            self.samples.clone(),
            self.config.sample_interval,
        ));

        let handles: Vec<_> = (0..self.config.workers)
            .map(|id| tokio::spawn(self.worker(id).run()))
            .collect();
        let joined = futures::future::join_all(handles).await;
        stop_sampler(sampler).await?;

        let mut summaries = Vec::with_capacity(joined.len());
        for (worker, result) in joined.into_iter().enumerate() {
            match result {
                Ok(Ok(summary)) => summaries.push(summary),
                Ok(Err(e)) => return Err(e),
                Err(e) => return Err(panicked(worker, e)),
            }
        }

        let report = self.report(summaries).await;
        report.check_invariants()?;
        info!(
            operations = report.total_operations,
            gate_peak = report.gate_peak,
            "simulation finished"
        );
        Ok(report)
    }

    /// Current `available` of every train, in index order.
    pub async fn snapshot(&self) -> Vec<TrainSnapshot> {
        self.ctx.pool.snapshot().await
    }

    async fn report(&self, workers: Vec<WorkerSummary>) -> Report {
        let trains = self.snapshot().await;
        Report {
            tallies: self.ctx.ledger.tallies(trains.len()),
            trains,
            workers,
            total_operations: self.ctx.ledger.total_operations(),
            gate_limit: self.ctx.gate.limit(),
            gate_peak: self.ctx.gate.peak(),
            sampled_peak: self.samples.peak(),
            samples: self.samples.count(),
        }
    }
}

/// Abort the sampler and surface a failed gate check it hit before that.
async fn stop_sampler(handle: JoinHandle<()>) -> Result<(), SimError> {
    handle.abort();
    match handle.await {
        Err(e) if e.is_panic() => Err(SimError::Invariant(format!(
            "gate sampler: {}",
            panic_reason(e)
        ))),
        _ => Ok(()),
    }
}

fn panicked(worker: WorkerId, e: JoinError) -> SimError {
    SimError::WorkerPanicked {
        worker,
        reason: panic_reason(e),
    }
}

fn panic_reason(e: JoinError) -> String {
    if !e.is_panic() {
        return e.to_string();
    }
    let payload = e.into_panic();
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic".to_string())
}
