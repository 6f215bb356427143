use anyhow::Context;
use solarcast::application::predictor::PredictionService;
use solarcast::config::Config;
use solarcast::infrastructure::artifacts::ArtifactStore;
use solarcast::interfaces::app::PredictApp;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

// A writer that sends log lines to the UI activity panel via a crossbeam channel
struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).to_string();
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// Cloneable wrapper for MakeWriter
#[derive(Clone)]
struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let (log_tx, log_rx) = crossbeam_channel::unbounded();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory { sender: log_tx })
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    let config = Config::from_env();
    info!("Loading artifact set from {:?}", config.artifacts.manifest);

    // Startup is fatal without a valid artifact set: no degraded predictions.
    let store = ArtifactStore::load(&config.artifacts)
        .context("cannot start without a valid scaler/model artifact set")?;
    let service = Arc::new(PredictionService::new(Arc::new(store)));

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([540.0, 820.0])
            .with_title("Solarcast"),
        ..Default::default()
    };

    eframe::run_native(
        "Solarcast",
        native_options,
        Box::new(|_cc| Ok(Box::new(PredictApp::new(service, log_rx)))),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}
