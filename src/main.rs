use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use emotion_companion::activity_log;
use emotion_companion::config::Config;
use emotion_companion::detectors::{face_detector_from_config, transcriber_from_config};
use emotion_companion::server::{self, AppState};

/// Web companion that reads face and voice emotion and suggests what to talk about
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file (default: ~/.emotioncompanion/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind (overrides config)
    #[arg(short, long)]
    bind: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    activity_log::init_logging(log_level);

    let config_path = match args.config {
        Some(path) => path,
        None => Config::config_path()?,
    };
    info!("Config: {}", config_path.display());

    let mut config = Config::load(&config_path)?;
    config.apply_env_overrides();
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }
    config.validate().context("Invalid configuration")?;

    let face_detector = face_detector_from_config(&config)?;
    let transcriber = transcriber_from_config(&config)?;

    activity_log::log_server_start(
        &config.socket_addr()?.to_string(),
        !config.face_detector_url.trim().is_empty(),
        !config.stt_server_url.trim().is_empty(),
    );

    let state = AppState::new(face_detector, transcriber);
    server::serve(&config, state).await?;

    info!("Server stopped");
    Ok(())
}
