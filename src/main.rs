use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, core_config_from_env, router};
use qform_core::CoreConfig;

/// Main entry point for the qform application
///
/// Resolves the core configuration once and serves the REST API:
/// text resolution, submission progress, spreadsheet exports, document validation, the feedback
/// status table and note permissions. Swagger UI is mounted at `/swagger-ui`.
///
/// # Environment Variables
/// - `QFORM_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `QFORM_DEFAULT_LANGUAGE`: fallback language for text resolution (default: "it")
/// - `QFORM_DATE_FORMAT`: timestamp format used in exports (default: "%d/%m/%Y %H:%M")
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("qform=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg: Arc<CoreConfig> = Arc::new(core_config_from_env()?);
    let rest_addr = std::env::var("QFORM_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("++ Starting qform REST on {}", rest_addr);

    let rest_app = router(AppState::new(cfg));
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, rest_app).await?;

    Ok(())
}
