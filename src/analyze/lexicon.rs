//! Vocabulary tables used by every stage of the engine.
//!
//! `Lexicon::default()` carries the built-in tables. An optional JSON file
//! (default `config/lexicon.json`) can override any subset of fields; missing
//! fields keep their built-in values.
//!
//! JSON shape (all keys optional):
//! {
//!   "emotional_terms": ["shocking", ...],
//!   "hedge_terms": ["may", ...],
//!   "domain_tiers": [{ "label": "high", "score": 90, "patterns": [".edu"] }]
//! }
//!
//! All matching against these lists is lowercase substring matching, except
//! `claim_verbs`, which are matched on word boundaries.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

pub const DEFAULT_LEXICON_PATH: &str = "config/lexicon.json";

/// One rung of the domain reputation cascade. Tiers are tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainTier {
    pub label: String,
    pub score: u8,
    pub patterns: Vec<String>,
}

impl DomainTier {
    fn new(label: &str, score: u8, patterns: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            score,
            patterns: owned(patterns),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Emotionally loaded words; drives emotional-language density.
    pub emotional_terms: Vec<String>,
    /// Phrases that indicate sourcing anywhere in the content.
    pub source_indicators: Vec<String>,
    /// Verbs that make a sentence a candidate claim.
    pub claim_verbs: Vec<String>,
    pub hedge_terms: Vec<String>,
    /// Strong assertions; a claim using one without hedging is disputed.
    pub strong_terms: Vec<String>,
    /// Sensational wording; a claim using one is misleading.
    pub sensational_terms: Vec<String>,
    /// Attribution inside a claim (status `verified`, +25 confidence).
    pub attribution_markers: Vec<String>,
    /// Hype wording that costs a claim 20 confidence points.
    pub hype_terms: Vec<String>,
    /// Unsupported certainty that costs a claim 15 confidence points.
    pub overclaim_terms: Vec<String>,
    pub domain_tiers: Vec<DomainTier>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            emotional_terms: owned(&[
                "shocking",
                "unbelievable",
                "incredible",
                "amazing",
                "terrible",
                "horrifying",
                "outrageous",
                "scandal",
                "explosive",
                "bombshell",
                "must-see",
                "viral",
                "breaking",
                "urgent",
                "crisis",
                "secret",
            ]),
            source_indicators: owned(&[
                "according to",
                "study",
                "research",
                "report",
                "source:",
                "http",
            ]),
            claim_verbs: owned(&[
                "is",
                "are",
                "was",
                "were",
                "shows",
                "proves",
                "demonstrates",
                "reveals",
                "confirms",
                "indicates",
                "suggests",
                "claims",
                "states",
                "reports",
                "found",
                "discovered",
            ]),
            hedge_terms: owned(&[
                "may",
                "might",
                "could",
                "possibly",
                "allegedly",
                "reportedly",
                "supposedly",
            ]),
            strong_terms: owned(&[
                "definitely",
                "absolutely",
                "certainly",
                "undoubtedly",
                "proven",
                "fact",
            ]),
            sensational_terms: owned(&[
                "shocking",
                "unbelievable",
                "secret",
                "don't want you to know",
                "incredible",
            ]),
            attribution_markers: owned(&["according to", "study", "research"]),
            hype_terms: owned(&["shocking", "unbelievable", "incredible", "amazing"]),
            overclaim_terms: owned(&["definitely", "absolutely"]),
            domain_tiers: vec![
                DomainTier::new(
                    "high",
                    90,
                    &[
                        ".edu",
                        ".gov",
                        ".ac.uk",
                        "reuters.com",
                        "apnews.com",
                        "bbc.com",
                        "nytimes.com",
                        "washingtonpost.com",
                        "theguardian.com",
                        "nature.com",
                        "science.org",
                        "npr.org",
                    ],
                ),
                DomainTier::new(
                    "news",
                    70,
                    &["news", "times", "post", "journal", "herald", "tribune"],
                ),
                DomainTier::new(
                    "social",
                    30,
                    &[
                        "twitter.com",
                        "x.com",
                        "facebook.com",
                        "instagram.com",
                        "tiktok.com",
                        "reddit.com",
                    ],
                ),
                DomainTier::new("blog", 50, &["wordpress", "blogger", "medium.com", "substack"]),
            ],
        }
    }
}

impl Lexicon {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let mut lex: Lexicon = serde_json::from_str(s).context("parsing lexicon json")?;
        lex.normalize();
        Ok(lex)
    }

    /// Lowercase and trim every entry; drop empties. Matching assumes lowercase.
    fn normalize(&mut self) {
        for list in [
            &mut self.emotional_terms,
            &mut self.source_indicators,
            &mut self.claim_verbs,
            &mut self.hedge_terms,
            &mut self.strong_terms,
            &mut self.sensational_terms,
            &mut self.attribution_markers,
            &mut self.hype_terms,
            &mut self.overclaim_terms,
        ] {
            clean(list);
        }
        for tier in &mut self.domain_tiers {
            clean(&mut tier.patterns);
            tier.score = tier.score.min(100);
        }
    }
}

/// Load a lexicon file directly (no caching).
pub fn load_lexicon_file(path: &Path) -> Result<Lexicon> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading lexicon from {}", path.display()))?;
    Lexicon::from_json_str(&content)
}

/// True if `text` (already lowercase) contains any of `terms`.
pub(crate) fn contains_any(text: &str, terms: &[String]) -> bool {
    terms.iter().any(|t| text.contains(t.as_str()))
}

/// Number of distinct `terms` found in `text` (already lowercase).
pub(crate) fn count_distinct(text: &str, terms: &[String]) -> usize {
    terms.iter().filter(|t| text.contains(t.as_str())).count()
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn clean(list: &mut Vec<String>) {
    let mut out: Vec<String> = Vec::with_capacity(list.len());
    for it in list.drain(..) {
        let t = it.trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    *list = out;
}
