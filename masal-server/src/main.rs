// masal TTS server
// Loads presets and model backends, then serves the HTTP API until shutdown

use anyhow::Context;
use clap::Parser;
use masal_server::{create_router, ApiState, LogConfig, ServerConfig};
use masal_spk::SpeechSynthesizer;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "masal-server", version, about = "Voice-preset text-to-speech HTTP server")]
struct Cli {
    /// Configuration file (TOML). Defaults to ./masal.toml when present.
    #[arg(short, long, env = "MASAL_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory for generated WAV files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "masal_spk=debug,info"
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(host) = &self.host {
            config.http.host = host.clone();
        }
        if let Some(port) = self.port {
            config.http.port = port;
        }
        if let Some(dir) = &self.output_dir {
            config.speech.output_dir = dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
        if self.json_logs {
            config.log.json = true;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ServerConfig::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply(&mut config);
    config.validate()?;

    init_tracing(&config.log)?;

    info!("🚀 Starting masal TTS server v{}", env!("CARGO_PKG_VERSION"));

    let synthesizer = SpeechSynthesizer::from_config(&config.speech).context("initializing speech synthesizer")?;
    info!(
        "✅ {} voices ready (default: {}), writing to {}",
        synthesizer.registry().len(),
        synthesizer.registry().default_voice(),
        synthesizer.output().dir().display()
    );

    let app = create_router(ApiState::new(Arc::new(synthesizer)));

    let listener = tokio::net::TcpListener::bind((config.http.host.as_str(), config.http.port))
        .await
        .with_context(|| format!("binding {}:{}", config.http.host, config.http.port))?;
    info!("✅ HTTP server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    info!("👋 masal stopped. Goodbye!");
    Ok(())
}

fn init_tracing(log: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .with_context(|| format!("invalid log level '{}'", log.level))?;

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
    Ok(())
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
