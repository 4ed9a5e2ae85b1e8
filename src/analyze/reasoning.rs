//! Reasoning trace: three fixed steps, a bucketed summary and a constant
//! methodology statement.

use super::signals::Signals;
use crate::analysis::{Reasoning, ReasoningStep};

pub const METHODOLOGY: &str = "This analysis uses rule-based heuristics including linguistic pattern matching, domain reputation scoring, and structural analysis. It does not rely on external APIs or AI models, making it fully deterministic and privacy-preserving.";

const CLOSING: &str = "Always verify claims through multiple independent sources.";

/// (minimum score, summary opening). First row the score reaches wins.
const SUMMARY_OPENINGS: [(u8, &str); 4] = [
    (75, "Content appears credible with good sourcing and minimal sensationalism. "),
    (50, "Content has mixed credibility signals. Some concerns present but not definitively problematic. "),
    (25, "Content shows multiple warning signs including sensational language or limited sourcing. "),
    (0, "Content exhibits significant credibility concerns. Exercise extreme caution. "),
];

/// (minimum score, label). Shared by the trace and the result label.
const CONFIDENCE_BANDS: [(u8, &str); 4] = [
    (80, "High"),
    (60, "Moderate"),
    (40, "Low"),
    (0, "Very Low"),
];

fn band(score: u8) -> &'static str {
    CONFIDENCE_BANDS
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, label)| *label)
        .unwrap_or("Very Low")
}

/// Label stored on the result, e.g. "Moderate Confidence".
pub fn confidence_label(score: u8) -> String {
    format!("{} Confidence", band(score))
}

/// Label used inside the trace, e.g. "Moderate confidence".
pub fn trust_label(score: u8) -> String {
    format!("{} confidence", band(score))
}

/// Comma-separated list of notable signals for step 2.
pub fn signal_summary(s: &Signals) -> String {
    let mut points = Vec::new();

    if s.domain_reputation > 80 {
        points.push("High-reputation source");
    } else if s.domain_reputation < 40 {
        points.push("Lower-reputation platform");
    }

    if s.source_presence > 4.0 {
        points.push("Well-sourced");
    } else if s.source_presence < 2.0 {
        points.push("Limited sourcing");
    }

    if s.emotional_language_density > 2.0 {
        points.push("High emotional language");
    }
    if s.sensational_punctuation > 5.0 {
        points.push("Sensational presentation");
    }

    if points.is_empty() {
        "Standard content patterns detected".to_string()
    } else {
        points.join(", ")
    }
}

pub fn summary(s: &Signals, trust_score: u8) -> String {
    let opening = SUMMARY_OPENINGS
        .iter()
        .find(|(min, _)| trust_score >= *min)
        .map(|(_, text)| *text)
        .unwrap_or(SUMMARY_OPENINGS[3].1);

    let mut out = String::from(opening);
    if s.emotional_language_density > 2.0 {
        out.push_str("High emotional language detected. ");
    }
    if s.source_presence < 2.0 {
        out.push_str("Limited external source attribution. ");
    }
    if s.domain_reputation < 40 {
        out.push_str("Content from platform with limited editorial oversight. ");
    }
    out.push_str(CLOSING);
    out
}

pub fn synthesize(s: &Signals, trust_score: u8, claim_count: usize) -> Reasoning {
    let plural = if claim_count == 1 { "" } else { "s" };
    let steps = vec![
        ReasoningStep::new(
            1,
            "Content Extraction",
            "Analyzed text content and linguistic patterns",
            format!("Extracted {claim_count} verifiable claim{plural} from content"),
        ),
        ReasoningStep::new(
            2,
            "Signal Analysis",
            "Evaluated multiple credibility indicators",
            signal_summary(s),
        ),
        ReasoningStep::new(
            3,
            "Trust Score Calculation",
            "Computed weighted score from all signals",
            format!(
                "Final trust score: {trust_score}/100 ({})",
                trust_label(trust_score)
            ),
        ),
    ];

    Reasoning {
        steps,
        summary: summary(s, trust_score),
        methodology: METHODOLOGY.to_string(),
    }
}
