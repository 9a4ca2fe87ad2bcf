use std::path::PathBuf;

use tracing::info;

use seatgate::{SimConfig, Simulation};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let metrics_port: Option<u16> = std::env::var("SEATGATE_METRICS_PORT")
        .ok()
        .and_then(|s| s.parse().ok());
    seatgate::observability::init(metrics_port);

    let report_path = std::env::var("SEATGATE_REPORT_JSON").ok().map(PathBuf::from);
    let config = SimConfig::from_env();

    info!("seatgate simulation");
    info!("  trains: {} x {} seats", config.trains, config.capacity);
    info!("  workers: {}, gate limit: {}", config.workers, config.gate_limit);
    info!("  worker lifetime: {:?}", config.worker_lifetime);
    info!("  think time: {:?}..={:?}", config.think_min, config.think_max);
    info!("  booking size: {}..={}", config.book_min, config.book_max);
    info!("  seed: {}", config.seed.map_or("random".to_string(), |s| s.to_string()));

    let sim = Simulation::new(config)?;
    let report = sim.run().await?;

    println!("\n{}", report.render_chart());

    if let Some(path) = report_path {
        report.write_json(&path)?;
        info!("report written to {}", path.display());
    }

    println!("Thanks for using our services!!!");
    Ok(())
}
