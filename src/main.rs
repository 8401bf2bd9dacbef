use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use symcheck_core::{config::log_path_from_env_value, CheckerService, CoreConfig};

/// Main entry point for the symptom checker service
///
/// Resolves configuration once, then serves the REST API until the process is stopped.
///
/// # Environment Variables
/// - `SYMCHECK_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `SYMCHECK_LOG_PATH`: Diagnosis log CSV file (default: "diagnosis_log.csv")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the log path is empty,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symcheck=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("SYMCHECK_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let log_path: PathBuf = log_path_from_env_value(std::env::var("SYMCHECK_LOG_PATH").ok());

    let cfg = Arc::new(CoreConfig::new(log_path)?);

    tracing::info!("++ Starting symptom checker REST on {}", rest_addr);
    tracing::info!("++ Logging checks to {}", cfg.log_path().display());

    let service = Arc::new(CheckerService::new(cfg));
    let app = api_rest::router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
