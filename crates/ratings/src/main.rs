use std::{env, fs, path::Path};

use anyhow::{Context, bail};
use bytes::Bytes;
use ratings::{
    ActivityRecord, FederationTier, RaceFinish, RatingConfig, RatingEngine, RouteProfile,
    ScoredFinish,
};
use serde::{Serialize, de::DeserializeOwned};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage:
  ratings rider <activities.json>
  ratings riders <batches.json>
  ratings route <route.gpx> [wind_kmh]
  ratings race <finishes.json> <international|national|regional>
  ratings standings <scored.json>...";

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config() -> anyhow::Result<RatingConfig> {
    match env::var("RATINGS_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading rating config from {}", path);
            RatingConfig::from_json_file(&path).with_context(|| format!("loading {path}"))
        }
        Err(_) => Ok(RatingConfig::default()),
    }
}

fn read_json<T: DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let contents = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {path}"))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_federation(raw: &str) -> anyhow::Result<FederationTier> {
    match raw.to_ascii_lowercase().as_str() {
        "international" => Ok(FederationTier::International),
        "national" => Ok(FederationTier::National),
        "regional" => Ok(FederationTier::Regional),
        other => bail!("unknown federation tier '{other}'"),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!(USAGE);
    };

    let engine = RatingEngine::new(load_config()?)?;

    match (command.as_str(), &args[1..]) {
        ("rider", [path]) => {
            let activities: Vec<ActivityRecord> = read_json(path)?;
            tracing::info!("Rating {} activities from {}", activities.len(), path);
            print_json(&engine.rate_rider(&activities))
        }
        ("riders", [path]) => {
            let batches: Vec<Vec<ActivityRecord>> = read_json(path)?;
            tracing::info!("Rating {} riders from {}", batches.len(), path);
            print_json(&engine.rate_riders(&batches))
        }
        ("route", [path, rest @ ..]) if rest.len() <= 1 => {
            let wind_kmh = rest
                .first()
                .map(|raw| raw.parse::<f64>())
                .transpose()
                .context("wind_kmh must be a number")?;
            let content =
                Bytes::from(fs::read(Path::new(path)).with_context(|| format!("reading {path}"))?);
            let profile = RouteProfile::from_gpx_bytes(&content)?;
            tracing::info!(
                "Route {}: {:.1} km, {:.0} m gain",
                path,
                profile.total_distance_km(),
                profile.elevation_gain_m()
            );
            print_json(&engine.route_difficulty(&profile, wind_kmh))
        }
        ("race", [path, federation]) => {
            let finishes: Vec<RaceFinish> = read_json(path)?;
            let federation = parse_federation(federation)?;
            print_json(&engine.score_race(&finishes, federation))
        }
        ("standings", paths) if !paths.is_empty() => {
            let mut results: Vec<ScoredFinish> = Vec::new();
            for path in paths {
                let race: Vec<ScoredFinish> = read_json(path)?;
                results.extend(race);
            }
            tracing::info!("Building standings from {} results", results.len());
            print_json(&engine.career_standings(&results))
        }
        _ => bail!(USAGE),
    }
}
