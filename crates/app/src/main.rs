use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;

use dispatch_app::{DispatchService, SimConfig, run_simulation};

fn main() -> anyhow::Result<()> {
    dispatch_observability::init();

    let config = SimConfig::from_env();
    let seed = config.seed.unwrap_or_else(|| {
        let seed: u64 = rand::random();
        tracing::warn!(seed, "DISPATCH_SEED not set; using a random seed");
        seed
    });
    tracing::info!(
        couriers = config.couriers,
        orders = config.orders,
        max_steps = config.max_steps,
        seed,
        "starting dispatch simulation"
    );

    let service = DispatchService::in_memory();
    let mut rng = StdRng::seed_from_u64(seed);
    let report = run_simulation(&service, &config, &mut rng).context("simulation failed")?;

    tracing::info!(
        ticks = report.ticks,
        completed = report.completed,
        pending = report.pending,
        events = service.journal().len(),
        "simulation finished"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
