//! evaluation.rs: Self-consistency check of an analysis result, plus the
//! static descriptor of the analyzer agent.
//!
//! The evaluator only reads a finished result. It never feeds back into
//! scoring.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;

pub const AGENT_MODEL: &str = "heuristic-analyzer-v1";
pub const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

const CAPABILITIES: [&str; 5] = [
    "claim_extraction",
    "linguistic_analysis",
    "domain_reputation",
    "reasoning_generation",
    "heuristic_evaluation",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub claim_count: usize,
    pub flag_count: usize,
    pub has_reasoning: bool,
    pub score_consistency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub trust_score: u8,
    /// In <0, 1>.
    pub consistency_score: f64,
    pub quality_metrics: QualityMetrics,
}

/// Score agreement is worth 5 tenths, claims 3, a summary 2.
pub fn evaluate(result: &AnalysisResult) -> Evaluation {
    let claim_count = result.claims.len();
    let flag_count = result.flags.len();
    let score = result.trust_score;

    let mut tenths: u8 = 0;
    if (score < 40 && flag_count >= 2) || (score > 70 && flag_count <= 1) {
        tenths += 5;
    }
    if claim_count > 0 {
        tenths += 3;
    }
    if !result.reasoning.summary.is_empty() {
        tenths += 2;
    }
    let consistency_score = f64::from(tenths) / 10.0;

    Evaluation {
        trust_score: score,
        consistency_score,
        quality_metrics: QualityMetrics {
            claim_count,
            flag_count,
            has_reasoning: !result.reasoning.steps.is_empty(),
            score_consistency: consistency_score,
        },
    }
}

/// Static description served by `GET /agent` and embedded in every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentInfo {
    pub model: &'static str,
    pub version: &'static str,
    pub capabilities: Vec<&'static str>,
    pub mode: &'static str,
    pub approach: &'static str,
    pub privacy: &'static str,
}

impl Default for AgentInfo {
    fn default() -> Self {
        Self {
            model: AGENT_MODEL,
            version: AGENT_VERSION,
            capabilities: CAPABILITIES.to_vec(),
            mode: "production",
            approach: "Rule-based heuristic analysis - no external APIs",
            privacy: "All analysis performed locally",
        }
    }
}
