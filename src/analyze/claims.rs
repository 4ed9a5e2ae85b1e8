//! Claim extraction and classification.
//!
//! Sentences are split on runs of `.`, `!`, `?`, kept when 21..=299 chars long
//! and containing a claim verb (word boundary, case-insensitive). The first
//! three survivors become claims, in document order. Without any survivor a
//! single synthetic `unverified` claim is emitted.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use super::lexicon::{contains_any, Lexicon};
use crate::analysis::{Claim, ClaimStatus};

pub const MAX_CLAIMS: usize = 3;
pub const MAX_CLAIM_CHARS: usize = 200;
const MIN_SENTENCE_CHARS: usize = 20;
const MAX_SENTENCE_CHARS: usize = 300;

const BASE_CONFIDENCE: i32 = 50;
const ATTRIBUTION_BONUS: i32 = 25;
const HYPE_PENALTY: i32 = 20;
const OVERCLAIM_PENALTY: i32 = 15;

static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence regex"));

/// Independent source hints: every row whose keywords appear adds its label.
const SOURCE_HINTS: &[(&[&str], &str)] = &[
    (&["study"], "Research study (specific source not verified)"),
    (&["research"], "Research publication (specific source not verified)"),
    (&["according to"], "Attributed source (verification needed)"),
    (&["expert", "professor"], "Expert opinion (credentials not verified)"),
];

/// Predicates of the status cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRule {
    /// Any sensational wording.
    Sensational,
    /// Strong assertion with no hedge softening it.
    UnhedgedAssertion,
    Hedged,
    Attributed,
}

/// Evaluated top to bottom, first match wins. Nothing matching → unverified.
pub const STATUS_RULES: [(StatusRule, ClaimStatus); 4] = [
    (StatusRule::Sensational, ClaimStatus::Misleading),
    (StatusRule::UnhedgedAssertion, ClaimStatus::Disputed),
    (StatusRule::Hedged, ClaimStatus::Unverified),
    (StatusRule::Attributed, ClaimStatus::Verified),
];

impl StatusRule {
    /// `sentence` must already be lowercase.
    pub fn matches(self, sentence: &str, lex: &Lexicon) -> bool {
        match self {
            StatusRule::Sensational => contains_any(sentence, &lex.sensational_terms),
            StatusRule::UnhedgedAssertion => {
                contains_any(sentence, &lex.strong_terms)
                    && !contains_any(sentence, &lex.hedge_terms)
            }
            StatusRule::Hedged => contains_any(sentence, &lex.hedge_terms),
            StatusRule::Attributed => contains_any(sentence, &lex.attribution_markers),
        }
    }
}

pub fn classify(sentence: &str, lex: &Lexicon) -> ClaimStatus {
    STATUS_RULES
        .iter()
        .find(|(rule, _)| rule.matches(sentence, lex))
        .map(|(_, status)| *status)
        .unwrap_or(ClaimStatus::Unverified)
}

/// Additive adjustments on top of 50, independent of the status cascade.
pub fn confidence(sentence: &str, lex: &Lexicon) -> u8 {
    let mut c = BASE_CONFIDENCE;
    if contains_any(sentence, &lex.attribution_markers) {
        c += ATTRIBUTION_BONUS;
    }
    if contains_any(sentence, &lex.hype_terms) {
        c -= HYPE_PENALTY;
    }
    if contains_any(sentence, &lex.overclaim_terms) {
        c -= OVERCLAIM_PENALTY;
    }
    c.clamp(0, 100) as u8
}

pub fn detect_sources(sentence: &str) -> Vec<String> {
    SOURCE_HINTS
        .iter()
        .filter(|(keys, _)| keys.iter().any(|k| sentence.contains(k)))
        .map(|(_, label)| label.to_string())
        .collect()
}

/// Claim used when no sentence qualifies.
pub fn fallback_claim() -> Claim {
    Claim {
        id: 1,
        text: "Content contains general information without specific factual claims".into(),
        status: ClaimStatus::Unverified,
        confidence: 50,
        sources: Vec::new(),
        reasoning: "No specific verifiable claims detected in content".into(),
    }
}

/// Holds the claim-verb matcher compiled from a lexicon.
#[derive(Debug, Clone)]
pub struct ClaimExtractor {
    /// `None` when the lexicon lists no verbs: nothing qualifies then.
    verbs: Option<Regex>,
}

impl ClaimExtractor {
    pub fn new(lex: &Lexicon) -> Result<Self> {
        if lex.claim_verbs.is_empty() {
            return Ok(Self { verbs: None });
        }
        let alternation = lex
            .claim_verbs
            .iter()
            .map(|v| regex::escape(v))
            .collect::<Vec<_>>()
            .join("|");
        let re = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
            .context("compiling claim verb matcher")?;
        Ok(Self { verbs: Some(re) })
    }

    /// Sentences that qualify as claims, in document order (not truncated).
    pub fn candidates<'a>(&self, content: &'a str) -> Vec<&'a str> {
        let Some(verbs) = &self.verbs else {
            return Vec::new();
        };
        SENTENCE_BREAK
            .split(content)
            .map(str::trim)
            .filter(|s| {
                let n = s.chars().count();
                n > MIN_SENTENCE_CHARS && n < MAX_SENTENCE_CHARS
            })
            .filter(|s| verbs.is_match(s))
            .take(MAX_CLAIMS)
            .collect()
    }

    /// Extract at most three claims; always returns at least one.
    pub fn extract(&self, content: &str, lex: &Lexicon) -> Vec<Claim> {
        let mut claims: Vec<Claim> = self
            .candidates(content)
            .into_iter()
            .zip(1u32..)
            .map(|(sentence, id)| {
                let lower = sentence.to_lowercase();
                let status = classify(&lower, lex);
                Claim {
                    id,
                    text: sentence.chars().take(MAX_CLAIM_CHARS).collect(),
                    status,
                    confidence: confidence(&lower, lex),
                    sources: detect_sources(&lower),
                    reasoning: status.reasoning().to_string(),
                }
            })
            .collect();

        if claims.is_empty() {
            claims.push(fallback_claim());
        }
        claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex() -> Lexicon {
        Lexicon::default()
    }

    fn extractor() -> ClaimExtractor {
        ClaimExtractor::new(&lex()).unwrap()
    }

    #[test]
    fn cascade_precedence() {
        let l = lex();
        // Sensational beats everything else.
        assert_eq!(
            classify("a shocking study definitely shows it", &l),
            ClaimStatus::Misleading
        );
        assert_eq!(
            classify("this is definitely the case", &l),
            ClaimStatus::Disputed
        );
        // Hedge cancels the strong assertion.
        assert_eq!(
            classify("this might definitely be the case", &l),
            ClaimStatus::Unverified
        );
        assert_eq!(
            classify("according to officials the bridge is closed", &l),
            ClaimStatus::Verified
        );
        assert_eq!(classify("the bridge is closed", &l), ClaimStatus::Unverified);
    }

    #[test]
    fn rule_table_order_is_stable() {
        let order: Vec<StatusRule> = STATUS_RULES.iter().map(|(r, _)| *r).collect();
        assert_eq!(
            order,
            vec![
                StatusRule::Sensational,
                StatusRule::UnhedgedAssertion,
                StatusRule::Hedged,
                StatusRule::Attributed,
            ]
        );
    }

    #[test]
    fn confidence_adjustments_are_additive() {
        let l = lex();
        assert_eq!(confidence("a study definitely shows this", &l), 60);
        assert_eq!(confidence("plain sentence here", &l), 50);
        assert_eq!(confidence("research shows amazing results", &l), 55);
        assert_eq!(confidence("an amazing and absolutely wild thing", &l), 15);
    }

    #[test]
    fn sources_are_independent() {
        let s = detect_sources("according to a study by a professor, research shows");
        assert_eq!(s.len(), 4);
        assert!(detect_sources("nothing to see").is_empty());
        assert_eq!(
            detect_sources("an expert and a professor"),
            vec!["Expert opinion (credentials not verified)".to_string()]
        );
    }

    #[test]
    fn only_first_three_claims_in_order() {
        let text = "The first sentence is a claim here. The second sentence is a claim too. \
                    The third sentence was also a claim. The fourth sentence is ignored now.";
        let claims = extractor().extract(text, &lex());
        assert_eq!(claims.len(), 3);
        assert_eq!(
            claims.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(claims[0].text.starts_with("The first"));
        assert!(claims[2].text.starts_with("The third"));
    }

    #[test]
    fn verbs_need_word_boundaries() {
        // "this" and "island" contain "is" but are not the verb.
        let claims = extractor().extract("This island hosts many rare birds", &lex());
        assert_eq!(claims, vec![fallback_claim()]);
    }

    #[test]
    fn length_window_is_exclusive() {
        // Exactly 20 characters → rejected.
        let twenty = "Sky is blue, really";
        assert_eq!(twenty.chars().count(), 19);
        let twenty = "Sky is blue, reallyy";
        assert_eq!(twenty.chars().count(), 20);
        assert!(extractor().candidates(twenty).is_empty());
        let twenty_one = "Sky is blue, reallyyy";
        assert_eq!(extractor().candidates(twenty_one).len(), 1);
    }

    #[test]
    fn long_claims_are_truncated() {
        let sentence = format!("The report is {}", "x".repeat(250));
        let claims = extractor().extract(&sentence, &lex());
        assert_eq!(claims[0].text.chars().count(), MAX_CLAIM_CHARS);
        assert_eq!(claims[0].status, ClaimStatus::Unverified);
    }

    #[test]
    fn empty_verb_list_yields_fallback() {
        let mut l = lex();
        l.claim_verbs.clear();
        let ex = ClaimExtractor::new(&l).unwrap();
        let claims = ex.extract("The market is open and trading today.", &l);
        assert_eq!(claims, vec![fallback_claim()]);
    }

    #[test]
    fn reasoning_follows_status() {
        let claims = extractor().extract(
            "They don't want you to know the water is poisoned.",
            &lex(),
        );
        assert_eq!(claims[0].status, ClaimStatus::Misleading);
        assert_eq!(claims[0].reasoning, ClaimStatus::Misleading.reasoning());
    }
}
