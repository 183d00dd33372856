//! Demo: seat the configured guests, wait for everyone to leave, print the report.
//!
//! Configuration comes from the JSON file named by `CAFE_CONFIG` (a `.env` file is
//! honoured), or the built-in five-table scenario when unset.

use anyhow::Context;

use cafe_seating::builders::build_cafe;
use cafe_seating::config::CafeConfig;
use cafe_seating::core::{share_sink, AppResult, DiningOccupancy, TracingEventSink};
use cafe_seating::runtime::{build_runtime, TokioSpawner};
use cafe_seating::util::init_tracing;

fn main() -> AppResult<()> {
    init_tracing();

    let cfg = CafeConfig::from_env().context("loading cafe configuration")?;
    let runtime = build_runtime(cfg.worker_threads).context("starting runtime")?;

    runtime.block_on(async move {
        let spawner = TokioSpawner::current();
        let cafe = build_cafe(
            &cfg,
            DiningOccupancy,
            spawner.clone(),
            Some(share_sink(TracingEventSink)),
        )?;
        let report = cafe.coordinator.run(cafe.guests).await?;
        spawner.join_all().await;

        println!("{}", report.to_json()?);
        Ok::<(), anyhow::Error>(())
    })
}
