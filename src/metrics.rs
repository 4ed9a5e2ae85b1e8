use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static GLOBAL: OnceCell<Metrics> = OnceCell::new();

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder and publish the configured pacing delay.
    /// Fails if another recorder is already installed in this process.
    pub fn init(pacing_delay_ms: u64) -> Result<Self> {
        // Default buckets; the trust score histogram is rendered as a summary.
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;

        gauge!("analysis_pacing_delay_ms").set(pacing_delay_ms as f64);

        Ok(Self { handle })
    }

    /// Process-wide instance; the recorder is installed on first use only.
    pub fn global(pacing_delay_ms: u64) -> Result<&'static Metrics> {
        let m = GLOBAL.get_or_try_init(|| Self::init(pacing_delay_ms))?;
        gauge!("analysis_pacing_delay_ms").set(pacing_delay_ms as f64);
        Ok(m)
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
