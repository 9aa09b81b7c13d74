//! Spellbook Server
//!
//! Main entry point that wires the auth core, store, and HTTP API together
//! and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use spellbook_api::AppState;
use spellbook_auth::store::MemoryStore;
use spellbook_core::config::AppConfig;
use spellbook_core::error::AppError;

/// Environment assumed when `SPELLBOOK_ENV` is unset.
const DEVELOPMENT_ENV: &str = "development";

/// How often expired refresh tokens are purged from the store.
const PURGE_INTERVAL: Duration = Duration::from_secs(3600);

#[tokio::main]
async fn main() {
    let env = std::env::var("SPELLBOOK_ENV").unwrap_or_else(|_| DEVELOPMENT_ENV.to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = check_signing_secret(&config, &env) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Refuses the placeholder signing secret outside development.
fn check_signing_secret(config: &AppConfig, env: &str) -> Result<(), AppError> {
    if !config.auth.uses_default_secret() {
        return Ok(());
    }
    if env == DEVELOPMENT_ENV {
        tracing::warn!(
            "auth.jwt_secret is the shipped placeholder; set SPELLBOOK__AUTH__JWT_SECRET"
        );
        return Ok(());
    }
    Err(AppError::configuration(format!(
        "auth.jwt_secret is the shipped placeholder; refusing to start in '{env}'"
    )))
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Spellbook v{}", env!("CARGO_PKG_VERSION"));

    let store = MemoryStore::new();
    let addr = config.server.bind_address();
    let app_state = AppState::new(config, Arc::new(store.clone()), Arc::new(store.clone()))?;

    let purge = tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            store.purge_expired();
        }
    });

    let app = spellbook_api::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Spellbook server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    purge.abort();
    tracing::info!("Spellbook server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
