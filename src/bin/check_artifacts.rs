//! Offline validation of a solarcast artifact set: loads the three files,
//! runs the startup checks and one probe prediction with default readings.

use clap::Parser;
use solarcast::application::predictor::PredictionService;
use solarcast::config::ArtifactPaths;
use solarcast::domain::features::Readings;
use solarcast::infrastructure::artifacts::ArtifactStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Validate a solarcast artifact set", long_about = None)]
struct Args {
    /// Directory holding manifest.json, scaler.json and model.json
    #[arg(long, default_value = "artifacts")]
    dir: PathBuf,

    /// Override the manifest path
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Override the scaler path
    #[arg(long)]
    scaler: Option<PathBuf>,

    /// Override the model path
    #[arg(long)]
    model: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();
    let defaults = ArtifactPaths::in_dir(&args.dir);
    let paths = ArtifactPaths {
        manifest: args.manifest.unwrap_or(defaults.manifest),
        scaler: args.scaler.unwrap_or(defaults.scaler),
        model: args.model.unwrap_or(defaults.model),
    };

    let store = ArtifactStore::load(&paths)?;
    println!(
        "Artifact set OK: {} model, target '{}' ({})",
        store.model().kind_name(),
        store.manifest().target,
        store.manifest().target_unit
    );
    println!("Features: {}", store.manifest().feature_names.join(", "));

    let service = PredictionService::new(Arc::new(store));
    let power = service.predict(&Readings::default().assemble())?;
    println!("Probe prediction with default readings: {power}");

    Ok(())
}
