use std::net::SocketAddr;

// ── Request metrics ─────────────────────────────────────────────

/// Counter: operations completed. Labels: kind, outcome.
pub const OPERATIONS_TOTAL: &str = "seatgate_operations_total";

/// Histogram: time a worker spent waiting at the admission gate, in seconds.
pub const GATE_WAIT_SECONDS: &str = "seatgate_gate_wait_seconds";

/// Histogram: time spent holding a gate slot, in seconds.
pub const GATE_HOLD_SECONDS: &str = "seatgate_gate_hold_seconds";

// ── Utilization ─────────────────────────────────────────────────

/// Gauge: workers currently admitted through the gate.
pub const GATE_ACTIVE: &str = "seatgate_gate_active";

/// Gauge: highest admitted count seen by the gate sampler.
pub const GATE_SAMPLED_PEAK: &str = "seatgate_gate_sampled_peak";

/// Gauge: workers that have not yet reached their deadline.
pub const WORKERS_RUNNING: &str = "seatgate_workers_running";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}
