//! # portald — portal daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`portal.toml`, env vars)
//! - Initialise logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the user repository (adapter) and inject it into the service
//! - Build the axum router, injecting the application service
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use portal_adapter_http_axum::state::AppState;
use portal_adapter_storage_sqlite_sqlx::SqliteUserRepository;
use portal_app::services::user_service::UserService;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&settings.logging.filter)?)
        .init();

    // Database
    let db = settings.database.open().await?;

    // Repository & service
    let user_repo = SqliteUserRepository::new(db.pool().clone());
    let user_service = UserService::new(user_repo);

    // HTTP
    let app = portal_adapter_http_axum::router::build(AppState::new(user_service));

    let bind_addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "portald listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("portald stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
