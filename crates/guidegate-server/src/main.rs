use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use guidegate_core::AppState;
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Parser, Debug)]
#[command(name = "guidegate-server", about = "Serves the configured user guide over HTTP")]
struct Cli {
    /// Path to the properties file
    #[arg(short, long, default_value = "application.properties")]
    config: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (overrides server.port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// The guide directory must exist before serving; create it if needed.
fn ensure_guide_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        anyhow::bail!("User guide path cannot be empty");
    }
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create user guide directory {:?}", path))?;
        tracing::info!("Created user guide directory {:?}", path);
    }
    if !path.is_dir() {
        anyhow::bail!("User guide path {:?} is not a directory", path);
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
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
    tracing::info!("Shutdown signal received, stopping server");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let mut app_config = config::load_config(&cli.config)?;
    if let Some(port) = cli.port {
        app_config.port = port;
    }
    ensure_guide_dir(&app_config.userguide_path)?;

    let addr = format!("{}:{}", cli.host, app_config.port);
    tracing::info!("User guides directory: {:?}", app_config.userguide_path);
    tracing::info!("Configured user guide file: {}", app_config.userguide_filename);
    tracing::info!("Static directory: {:?}", app_config.static_path);

    let router = guidegate_api::build_router(&app_config);
    let app = router.with_state(AppState::new(app_config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!("Server listening on {}", addr);
    tracing::info!("Available endpoints:");
    for (endpoint, description) in guidegate_api::ENDPOINTS {
        tracing::info!("  {} - {}", endpoint, description);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
