//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging of the HTTP surface (with OpenAPI/Swagger UI). The
//! workspace's main `qform-run` binary starts the same router.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the standalone REST server
///
/// # Environment Variables
/// - `QFORM_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `QFORM_DEFAULT_LANGUAGE`: fallback language for text resolution (default: "it")
/// - `QFORM_DATE_FORMAT`: timestamp format used in exports (default: "%d/%m/%Y %H:%M")
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Arc::new(api_rest::core_config_from_env()?);
    let addr = std::env::var("QFORM_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("++ Starting qform REST API on {}", addr);
    tracing::info!(
        "++ Default language {}, date format {}",
        cfg.default_language(),
        cfg.date_format()
    );

    let app = api_rest::router(api_rest::AppState::new(cfg));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
