//! api.rs: HTTP boundary around the engine.
//!
//! Every `/analyze` call answers 200 with a well-formed result: bad input maps
//! to the "No Analysis" result, engine failures (errors or panics) map to the
//! "Analysis Error" result.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use metrics::{counter, histogram};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use shuttle_axum::axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::analysis::{AnalysisInput, AnalysisResult};
use crate::analyze::{EngineHandle, HeuristicEngine};
use crate::config::AppConfig;
use crate::evaluation::{evaluate, AgentInfo, Evaluation};
use crate::history::{EvaluationHistory, HistoryEntry};
use crate::logging::anon_hash;

const DEBUG_HISTORY_ROWS: usize = 10;

#[derive(Clone)]
pub struct AppState {
    pub engine: EngineHandle,
    pub history: Arc<EvaluationHistory>,
    pub pacing: Duration,
}

impl AppState {
    pub fn new(engine: EngineHandle, history_capacity: usize, pacing_delay_ms: u64) -> Self {
        Self {
            engine,
            history: Arc::new(EvaluationHistory::with_capacity(history_capacity)),
            pacing: Duration::from_millis(pacing_delay_ms),
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            cfg.lexicon.engine_handle()?,
            cfg.server.history_capacity,
            cfg.server.pacing_delay_ms,
        ))
    }
}

impl Default for AppState {
    fn default() -> Self {
        let cfg = AppConfig::default();
        Self::new(
            EngineHandle::new(HeuristicEngine::default()),
            cfg.server.history_capacity,
            cfg.server.pacing_delay_ms,
        )
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze))
        .route("/agent", get(agent))
        .route("/debug/history", get(debug_history))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Decision handed over by an upstream orchestration agent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AiAgentDecision {
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub decision: Option<String>,
}

/// Only `content` decides between analysis and the "No Analysis" result.
/// Optional fields of the wrong type are dropped instead of rejecting the body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub images: Vec<serde_json::Value>,
    #[serde(default, rename = "contentType", deserialize_with = "lenient")]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ai_agent_decision: Option<AiAgentDecision>,
}

/// Any JSON value; a type mismatch yields `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub word_count: usize,
    pub image_count: usize,
    /// Seconds.
    pub analysis_time: f64,
    pub content_length: usize,
    pub claim_count: usize,
    pub flag_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub id: String,
    pub timestamp: String,
    pub url: String,
    #[serde(rename = "contentType")]
    pub content_type_label: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub metadata: ResponseMetadata,
    pub agent_info: AgentInfo,
    pub evaluation: Evaluation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_agent_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_agent_decision: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    NoContent,
    Error,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::NoContent => "no_content",
            Outcome::Error => "error",
        }
    }
}

/// Run one engine call, converting errors and panics into the error result.
pub fn run_guarded<F>(f: F) -> (AnalysisResult, Outcome)
where
    F: FnOnce() -> Result<AnalysisResult>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(r)) => (r, Outcome::Ok),
        Ok(Err(e)) => {
            warn!(target: "api", error = %format!("{e:#}"), "analysis failed");
            (AnalysisResult::analysis_error(format!("{e:#}")), Outcome::Error)
        }
        Err(panic) => {
            let msg = panic_message(panic.as_ref());
            warn!(target: "api", error = %msg, "analysis panicked");
            (AnalysisResult::analysis_error(msg), Outcome::Error)
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "analysis panicked".to_string()
    }
}

/// Assemble the wire response. Clock values come in as parameters.
pub fn build_response(
    req: &AnalyzeRequest,
    mut result: AnalysisResult,
    now: DateTime<Utc>,
    elapsed: Duration,
) -> AnalyzeResponse {
    let content = req.content.as_deref().unwrap_or("");
    let hash6: String = anon_hash(content).chars().take(6).collect();

    let (ai_agent_summary, ai_agent_decision) = match &req.ai_agent_decision {
        Some(d) => {
            if let Some(label) = &d.decision {
                result.confidence_label = label.clone();
            }
            (
                Some(d.summary.clone().unwrap_or_default()),
                Some(d.decision.clone().unwrap_or_default()),
            )
        }
        None => (None, None),
    };

    let content_type_label = req
        .content_type
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(result.content_type.as_str())
        .to_string();

    let metadata = ResponseMetadata {
        word_count: content.split_whitespace().count(),
        image_count: req.images.len(),
        analysis_time: elapsed.as_secs_f64(),
        content_length: content.chars().count(),
        claim_count: result.claims.len(),
        flag_count: result.flags.len(),
    };

    let url = req
        .url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("N/A")
        .to_string();

    AnalyzeResponse {
        id: format!("analysis-{}-{hash6}", now.format("%Y%m%d%H%M%S")),
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        url,
        content_type_label,
        evaluation: evaluate(&result),
        metadata,
        agent_info: AgentInfo::default(),
        result,
        ai_agent_summary,
        ai_agent_decision,
    }
}

async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Json<AnalyzeResponse> {
    let started = Instant::now();

    let req = match body {
        Ok(Json(req)) => req,
        Err(rej) => {
            warn!(target: "api", error = %rej, "malformed analyze request");
            AnalyzeRequest::default()
        }
    };

    let content = req.content.clone().unwrap_or_default();
    let (result, outcome) = if content.trim().is_empty() {
        (AnalysisResult::no_content(), Outcome::NoContent)
    } else {
        let input = AnalysisInput {
            content,
            url: req.url.clone(),
            title: req.title.clone(),
        };
        let engine = state.engine.current();
        run_guarded(|| engine.try_analyze(&input))
    };

    if !state.pacing.is_zero() {
        tokio::time::sleep(state.pacing).await;
    }

    // Millisecond precision, same as the wire timestamp.
    let now = Utc::now().trunc_subsecs(3);
    let resp = build_response(&req, result, now, started.elapsed());

    counter!("analysis_requests_total", "outcome" => outcome.as_str()).increment(1);
    histogram!("analysis_trust_score").record(f64::from(resp.result.trust_score));

    info!(
        target: "api",
        id = %resp.id,
        outcome = outcome.as_str(),
        trust_score = resp.result.trust_score,
        claims = resp.metadata.claim_count,
        flags = resp.metadata.flag_count,
        elapsed_ms = resp.metadata.analysis_time * 1000.0,
        "analyze"
    );

    state.history.push(HistoryEntry {
        id: resp.id.clone(),
        timestamp: now,
        confidence_label: resp.result.confidence_label.clone(),
        evaluation: resp.evaluation.clone(),
    });

    Json(resp)
}

async fn agent() -> Json<AgentInfo> {
    Json(AgentInfo::default())
}

async fn debug_history(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(state.history.snapshot_last_n(DEBUG_HISTORY_ROWS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FlagType;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap()
    }

    fn req(content: &str) -> AnalyzeRequest {
        AnalyzeRequest {
            content: Some(content.to_string()),
            ..AnalyzeRequest::default()
        }
    }

    #[test]
    fn response_carries_injected_clock() {
        let r = req("Plain words here");
        let resp = build_response(&r, AnalysisResult::no_content(), at(), Duration::from_millis(250));
        let hash6: String = anon_hash("Plain words here").chars().take(6).collect();
        assert_eq!(resp.id, format!("analysis-20260304050607-{hash6}"));
        assert_eq!(resp.timestamp, "2026-03-04T05:06:07.000Z");
        assert_eq!(resp.metadata.analysis_time, 0.25);
        assert_eq!(resp.metadata.word_count, 3);
        assert_eq!(resp.url, "N/A");
    }

    #[test]
    fn caller_content_type_wins() {
        let mut r = req("x");
        r.content_type = Some("video".into());
        let resp = build_response(&r, AnalysisResult::no_content(), at(), Duration::ZERO);
        assert_eq!(resp.content_type_label, "video");

        let r = req("x");
        let resp = build_response(&r, AnalysisResult::no_content(), at(), Duration::ZERO);
        assert_eq!(resp.content_type_label, "unknown");
    }

    #[test]
    fn agent_decision_overrides_label() {
        let mut r = req("x");
        r.ai_agent_decision = Some(AiAgentDecision {
            summary: None,
            decision: Some("Likely Reliable".into()),
        });
        let resp = build_response(&r, AnalysisResult::no_content(), at(), Duration::ZERO);
        assert_eq!(resp.result.confidence_label, "Likely Reliable");
        assert_eq!(resp.ai_agent_summary.as_deref(), Some(""));
        assert_eq!(resp.ai_agent_decision.as_deref(), Some("Likely Reliable"));
    }

    #[test]
    fn summary_only_agent_decision_keeps_label() {
        let mut r = req("x");
        r.ai_agent_decision = Some(AiAgentDecision {
            summary: Some("looks fine".into()),
            decision: None,
        });
        let resp = build_response(&r, AnalysisResult::no_content(), at(), Duration::ZERO);
        assert_eq!(resp.result.confidence_label, "No Analysis");
        assert_eq!(resp.ai_agent_summary.as_deref(), Some("looks fine"));
    }

    #[test]
    fn errors_and_panics_become_error_result() {
        let (r, o) = run_guarded(|| Err(anyhow::anyhow!("lexicon exploded")));
        assert_eq!(o, Outcome::Error);
        assert_eq!(r.confidence_label, "Analysis Error");
        assert_eq!(r.flags[0].kind, FlagType::Critical);
        assert_eq!(r.flags[0].details, "lexicon exploded");

        let (r, o) = run_guarded(|| panic!("boom"));
        assert_eq!(o, Outcome::Error);
        assert_eq!(r.flags[0].details, "boom");
        assert_eq!(r.trust_score, 50);
    }

    #[test]
    fn mistyped_optional_fields_are_dropped() {
        let r: AnalyzeRequest = serde_json::from_str(
            r#"{"content":"The bridge is closed.","images":"one.png","title":7,
                "url":null,"ai_agent_decision":{"decision":1,"summary":"ok"}}"#,
        )
        .unwrap();
        assert_eq!(r.content.as_deref(), Some("The bridge is closed."));
        assert!(r.images.is_empty());
        assert_eq!(r.title, None);
        assert_eq!(r.url, None);
        let d = r.ai_agent_decision.unwrap();
        assert_eq!(d.decision, None);
        assert_eq!(d.summary.as_deref(), Some("ok"));

        let r: AnalyzeRequest = serde_json::from_str(r#"{"content":42}"#).unwrap();
        assert_eq!(r.content, None);
    }

    #[test]
    fn response_flattens_result_fields() {
        let resp = build_response(&req("x"), AnalysisResult::no_content(), at(), Duration::ZERO);
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(v["trust_score"], 50);
        assert_eq!(v["confidence_label"], "No Analysis");
        assert_eq!(v["contentType"], "unknown");
        assert_eq!(v["metadata"]["claimCount"], 1);
        assert!(v.get("ai_agent_decision").is_none());
        assert_eq!(v["evaluation"]["consistency_score"], 0.5);
    }
}
