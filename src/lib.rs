// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod analysis;
pub mod analyze;
pub mod api;
pub mod config;
pub mod evaluation;
pub mod history;
pub mod logging;
pub mod metrics;

// ---- Re-exports for stable public API ----
pub use crate::analysis::{AnalysisInput, AnalysisResult};
pub use crate::analyze::{EngineHandle, HeuristicEngine, Lexicon};
pub use crate::api::{router, AppState};

use shuttle_axum::axum::Router;
use tracing::info;

use crate::config::AppConfig;
use crate::metrics::Metrics;

/// Full application router as served by the binary: config from disk/env,
/// engine handle, history, CORS and `/metrics`.
pub async fn app() -> anyhow::Result<Router> {
    let cfg = AppConfig::load()?;
    let state = AppState::from_config(&cfg)?;
    let metrics = Metrics::global(cfg.server.pacing_delay_ms)?;

    info!(
        pacing_delay_ms = cfg.server.pacing_delay_ms,
        history_capacity = cfg.server.history_capacity,
        lexicon = %cfg.lexicon.path.display(),
        hot_reload = cfg.lexicon.hot_reload,
        "analyzer configured"
    );

    Ok(api::router(state).merge(metrics.router()))
}
