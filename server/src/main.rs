mod auth;
mod config;
mod error;
mod logging;
mod persistence;
mod review;
mod service;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use config::ServerConfig;
use persistence::sqlite::Database;
use persistence::{now_timestamp, LoginSessionRepository};
use state::AppState;
use tokio::net::TcpListener;

/// DailyCards flashcard server
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Address to listen on (overrides DAILYCARDS_ADDR)
    #[arg(long)]
    addr: Option<String>,

    /// Directory holding the database (overrides DAILYCARDS_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Built web client to serve outside /api (overrides DAILYCARDS_STATIC_DIR)
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

impl Cli {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(addr) = self.addr {
            config.addr = addr;
        }
        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        if let Some(dir) = self.static_dir {
            config.static_dir = Some(dir);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // Tracing goes first so config warnings are not lost.
    let _log_guard = logging::init_tracing(config::get_log_dir().as_deref());
    let config = cli.apply(ServerConfig::from_env());

    tracing::info!("Starting DailyCards server");
    tracing::info!("Using data directory: {}", config.data_dir.display());

    let db_path = config.database_path();
    let db = Database::open(&db_path)
        .await
        .with_context(|| format!("opening database at {}", db_path.display()))?;

    let state = Arc::new(AppState::new(&db, config.sessions.clone()));
    match state.logins.purge_expired(now_timestamp()).await {
        Ok(0) => {}
        Ok(purged) => tracing::info!(purged, "Removed expired login sessions"),
        Err(e) => tracing::warn!("Failed to purge expired login sessions: {}", e),
    }

    let app = service::router(state, &config);

    let listener = TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    tracing::info!("Server listening on {}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        tracing::info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
