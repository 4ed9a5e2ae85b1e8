//! Credibility Analyzer: Binary Entrypoint
//! Boots the Axum HTTP server via Shuttle: config, engine handle, routes, metrics.
//!
//! See `README.md` for quickstart and `DESIGN.md` for architecture notes.

use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // This enables ANALYZER_CONFIG_PATH / ANALYZER_PACING_DELAY_MS from .env.
    let _ = dotenvy::dotenv();

    // No-op in production.
    credibility_analyzer::logging::init_dev_tracing();

    let router = credibility_analyzer::app().await?;
    Ok(router.into())
}
