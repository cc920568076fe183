//! Conduit server: loads config from the environment, prepares the database
//! when one is configured, and serves the API.
//!
//! Run from repo root: `cargo run -p conduit-server`

use conduit_api::{app, connect, ensure_database_exists, ensure_tables, AppConfig, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("conduit_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    let pool = match &config.database {
        Some(options) => {
            ensure_database_exists(options).await?;
            let pool = connect(options).await?;
            ensure_tables(&pool).await?;
            Some(pool)
        }
        None => {
            tracing::warn!("no database configured; readiness reports it as disabled");
            None
        }
    };

    let addr = config.bind_address();
    let router = app(AppState::new(config, pool));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Conduit listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
