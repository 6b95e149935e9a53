use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load configuration from `config.toml` (or `$CONFIG_PATH`); fall back to
/// environment variables only when that file does not exist.
pub fn load_config() -> Result<AppConfig, StartupError> {
    load_config_from(&configs::config_path())
}

pub fn load_config_from(path: &str) -> Result<AppConfig, StartupError> {
    let invalid = |e: anyhow::Error| StartupError::InvalidConfig(e.to_string());
    match configs::load_optional_from_file(path).map_err(invalid)? {
        Some(mut cfg) => {
            cfg.normalize_and_validate().map_err(invalid)?;
            Ok(cfg)
        }
        None => {
            warn!(%path, "config file not found; using environment");
            AppConfig::from_env().map_err(invalid)
        }
    }
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}:{}: {e}", server.host, server.port)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    warn!("signal received, starting graceful shutdown");
}

/// Public entry: load configuration, build the app and run the HTTP server
pub async fn run() -> Result<(), StartupError> {
    dotenv().ok();
    init_logging_from_env();
    let cfg = load_config()?;
    run_with(cfg).await
}

/// Run the HTTP server with an already validated configuration
pub async fn run_with(cfg: AppConfig) -> Result<(), StartupError> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await.map_err(anyhow::Error::from)?;
        info!("database migrations applied");
    }

    let state = ServerState::from_parts(db, &cfg.integrations)?;
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, joke = %cfg.integrations.joke.base_url, booking = %cfg.integrations.booking.base_url, "starting student registry");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}
