//! Signal extraction: numeric features derived from the raw text and URL.
//!
//! Pure and total. Absent inputs degrade to neutral defaults (no URL gives a
//! domain reputation of 50).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::lexicon::{count_distinct, Lexicon};

/// Reputation used when no URL is supplied.
pub const NO_URL_REPUTATION: u8 = 50;
/// Reputation used when a URL matches none of the tiers.
pub const UNLISTED_REPUTATION: u8 = 60;

const SOURCE_PRESENCE_CAP: f64 = 10.0;

static MULTI_EXCLAMATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"!{2,}").expect("bang regex"));
static CAPS_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]{3,}\b").expect("caps regex"));
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://").expect("link regex"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signals {
    /// Distinct emotional terms per 100 words.
    pub emotional_language_density: f64,
    /// `!` + 3 per `!!+` run + 0.5 per `?`.
    pub sensational_punctuation: f64,
    pub domain_reputation: u8,
    /// In <0, 10>.
    pub source_presence: f64,
    /// Characters, not bytes.
    pub content_length: usize,
    /// Percentage of words that are all-caps (3+ letters).
    pub caps_ratio: f64,
    pub exclamation_count: usize,
    pub question_count: usize,
    pub url_count: usize,
    /// In <0, 100>.
    pub readability_score: f64,
}

impl Signals {
    /// Every float is finite. The aggregator relies on it.
    pub fn is_finite(&self) -> bool {
        [
            self.emotional_language_density,
            self.sensational_punctuation,
            self.source_presence,
            self.caps_ratio,
            self.readability_score,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Compute all signals for one input. `title` is accepted for parity with the
/// input contract; no signal currently depends on it.
pub fn extract(content: &str, url: &str, _title: &str, lex: &Lexicon) -> Signals {
    let lower = content.to_lowercase();
    let words: Vec<&str> = content.split_whitespace().collect();
    let word_count = words.len();

    let emotional_hits = count_distinct(&lower, &lex.emotional_terms) as f64;
    let emotional_language_density = emotional_hits / (word_count as f64 / 100.0).max(1.0);

    let exclamation_count = content.matches('!').count();
    let question_count = content.matches('?').count();
    let bang_runs = MULTI_EXCLAMATION.find_iter(content).count();
    let sensational_punctuation =
        exclamation_count as f64 + (bang_runs as f64 * 3.0) + (question_count as f64 * 0.5);

    let source_hits = count_distinct(&lower, &lex.source_indicators) as f64;
    let source_presence = (source_hits * 2.0).min(SOURCE_PRESENCE_CAP);

    let caps_ratio = if word_count == 0 {
        0.0
    } else {
        CAPS_WORD.find_iter(content).count() as f64 / word_count as f64 * 100.0
    };

    let avg_word_len = if word_count == 0 {
        0.0
    } else {
        words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count as f64
    };
    let readability_score = (100.0 - avg_word_len * 5.0).clamp(0.0, 100.0);

    Signals {
        emotional_language_density,
        sensational_punctuation,
        domain_reputation: domain_reputation(url, lex),
        source_presence,
        content_length: content.chars().count(),
        caps_ratio,
        exclamation_count,
        question_count,
        url_count: LINK.find_iter(content).count(),
        readability_score,
    }
}

/// First matching tier wins; no URL → 50, unlisted → 60.
pub fn domain_reputation(url: &str, lex: &Lexicon) -> u8 {
    if url.is_empty() {
        return NO_URL_REPUTATION;
    }
    let lower = url.to_lowercase();
    lex.domain_tiers
        .iter()
        .find(|tier| tier.patterns.iter().any(|p| lower.contains(p.as_str())))
        .map(|tier| tier.score)
        .unwrap_or(UNLISTED_REPUTATION)
}
