use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::feed::ActionFeed;
use crate::gate::AdmissionGate;
use crate::ledger::Ledger;
use crate::model::*;
use crate::observability::{
    GATE_HOLD_SECONDS, GATE_WAIT_SECONDS, OPERATIONS_TOTAL, WORKERS_RUNNING,
};
use crate::pool::ResourcePool;

/// Everything workers share. Cloning clones the handles, not the state.
#[derive(Clone)]
pub struct SimContext {
    pub pool: Arc<ResourcePool>,
    pub gate: Arc<AdmissionGate>,
    pub feed: Arc<ActionFeed>,
    pub ledger: Arc<Ledger>,
}

impl SimContext {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            pool: Arc::new(ResourcePool::new(config.trains, config.capacity)),
            gate: AdmissionGate::new(config.gate_limit),
            feed: Arc::new(ActionFeed::new(config.feed_capacity)),
            ledger: Arc::new(Ledger::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSummary {
    pub worker: WorkerId,
    pub iterations: u64,
}

/// One simulated client.
///
/// Per iteration: think, draw a request, wait at the gate, lock the target
/// train, run the operation, unlock the train, leave the gate. The deadline
/// is checked only after a full iteration, so an operation that has started
/// always finishes.
pub struct Worker {
    id: WorkerId,
    ctx: SimContext,
    config: Arc<SimConfig>,
    rng: StdRng,
}

impl Worker {
    pub fn new(id: WorkerId, ctx: SimContext, config: Arc<SimConfig>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(id as u64)),
            None => StdRng::from_os_rng(),
        };
        Self {
            id,
            ctx,
            config,
            rng,
        }
    }

    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Uniform train, uniform kind, uniform booking quantity.
    pub fn next_request(&mut self) -> Request {
        let train = self.rng.random_range(0..self.ctx.pool.len());
        let op = match OpKind::ALL[self.rng.random_range(0..OpKind::ALL.len())] {
            OpKind::Inquire => Op::Inquire,
            OpKind::Book => Op::Book {
                seats: self
                    .rng
                    .random_range(self.config.book_min..=self.config.book_max),
            },
            OpKind::Cancel => Op::Cancel,
        };
        Request::new(train, op)
    }

    fn think_time(&mut self) -> Duration {
        self.rng
            .random_range(self.config.think_min..=self.config.think_max)
    }

    /// Run one request through the gate and the train lock.
    ///
    /// The gate slot is taken before the train lock and given back after it,
    /// so no train lock is ever held while parked at the gate.
    pub async fn execute(&mut self, request: Request) -> Result<Outcome, SimError> {
        let train = self
            .ctx
            .pool
            .get(request.train)
            .ok_or(SimError::UnknownTrain(request.train))?;
        let kind = request.op.kind();

        self.emit(request.train, kind, ActionEvent::Waiting);
        let waiting_since = Instant::now();
        let permit = self.ctx.gate.acquire().await?;
        let admitted_at = Instant::now();
        metrics::histogram!(GATE_WAIT_SECONDS)
            .record((admitted_at - waiting_since).as_secs_f64());
        self.emit(request.train, kind, ActionEvent::Admitted);

        let mut guard = train.lock_owned().await;
        let outcome = guard.apply(request.op, &mut self.rng);
        drop(guard);
        permit.release();
        metrics::histogram!(GATE_HOLD_SECONDS).record(admitted_at.elapsed().as_secs_f64());

        self.ctx.ledger.record(request.train, &outcome);
        metrics::counter!(OPERATIONS_TOTAL, "kind" => kind.label(), "outcome" => outcome.label())
            .increment(1);
        self.emit(request.train, kind, ActionEvent::Completed(outcome));
        Ok(outcome)
    }

    /// Loop until the worker's own deadline passes.
    pub async fn run(mut self) -> Result<WorkerSummary, SimError> {
        let deadline = Instant::now() + self.config.worker_lifetime;
        metrics::gauge!(WORKERS_RUNNING).increment(1.0);
        debug!(worker = self.id, "worker started");

        let result = self.run_until(deadline).await;

        metrics::gauge!(WORKERS_RUNNING).decrement(1.0);
        if let Ok(summary) = &result {
            debug!(worker = self.id, iterations = summary.iterations, "worker done");
        }
        result
    }

    async fn run_until(&mut self, deadline: Instant) -> Result<WorkerSummary, SimError> {
        let mut iterations = 0u64;
        loop {
            tokio::time::sleep(self.think_time()).await;
            let request = self.next_request();
            self.execute(request).await?;
            iterations += 1;

            if Instant::now() >= deadline {
                break;
            }
        }
        Ok(WorkerSummary {
            worker: self.id,
            iterations,
        })
    }

    fn emit(&self, train: TrainId, kind: OpKind, event: ActionEvent) {
        let record = ActionRecord {
            worker: self.id,
            train,
            kind,
            event,
        };
        match event {
            ActionEvent::Completed(_) => info!("{record}"),
            ActionEvent::Waiting | ActionEvent::Admitted => debug!("{record}"),
        }
        self.ctx.feed.send(record);
    }
}
