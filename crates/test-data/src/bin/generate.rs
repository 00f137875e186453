//! Writes a reproducible sample dataset for the `ratings` CLI.
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin generate -- ./sample-data 12345
//! ```

use std::{env, fs, path::PathBuf};

use anyhow::Context;
use test_data::{config::GenerateConfig, dataset::Dataset, gpx::route_gpx};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "./sample-data".to_string()));
    let seed = match args.next() {
        Some(raw) => raw.parse::<u64>().context("seed must be an integer")?,
        None => GenerateConfig::default().seed,
    };

    let config = GenerateConfig {
        seed,
        ..Default::default()
    };
    let dataset = Dataset::generate(&config);

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let batches = dataset.activity_batches();
    fs::write(
        out_dir.join("batches.json"),
        serde_json::to_vec_pretty(&batches)?,
    )?;
    for (i, rider) in dataset.riders.iter().enumerate() {
        fs::write(
            out_dir.join(format!("rider_{}.json", i + 1)),
            serde_json::to_vec_pretty(&rider.activities)?,
        )?;
    }
    fs::write(
        out_dir.join("riders.json"),
        serde_json::to_vec_pretty(&dataset.riders)?,
    )?;

    for (i, route) in dataset.routes.iter().enumerate() {
        fs::write(
            out_dir.join(format!("route_{}.gpx", i + 1)),
            route_gpx(&route.profile, &route.name),
        )?;
    }

    for (i, race) in dataset.races.iter().enumerate() {
        fs::write(
            out_dir.join(format!("race_{}.json", i + 1)),
            serde_json::to_vec_pretty(&race.finishes)?,
        )?;
        tracing::info!(
            "  {}: {} finishers, {:?}",
            race.name,
            race.finishes.len(),
            race.federation
        );
    }

    tracing::info!("Dataset written to {}", out_dir.display());
    tracing::info!("  Seed: {}", seed);
    tracing::info!("  Riders: {}", dataset.riders.len());
    tracing::info!(
        "  Activities: {}",
        batches.iter().map(Vec::len).sum::<usize>()
    );
    tracing::info!("  Routes: {}", dataset.routes.len());
    tracing::info!("  Races: {}", dataset.races.len());

    Ok(())
}
