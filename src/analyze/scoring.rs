//! Trust score aggregation.
//!
//! Additive model over the extracted signals, starting from the domain
//! reputation:
//!
//! score = reputation
//!       − 10 × emotional density
//!       − min(punctuation, 20)        (only when punctuation > 5)
//!       + 1.5 × source presence
//!       − 2 × caps ratio              (only when caps ratio > 5)
//!       − 15                          (fewer than 200 chars)
//!       + 5                           (between 500 and 3000 chars, exclusive)
//!       + 5 / − 5                     (2..=10 links / more than 10 links)
//!
//! Rounded to the nearest integer and clamped to <0, 100> once, at the end.
//! Lengths 200..=500 get no adjustment at all.

use super::signals::Signals;

const EMOTION_WEIGHT: f64 = 10.0;
const PUNCTUATION_THRESHOLD: f64 = 5.0;
const PUNCTUATION_CAP: f64 = 20.0;
const SOURCE_WEIGHT: f64 = 1.5;
const CAPS_THRESHOLD: f64 = 5.0;
const CAPS_WEIGHT: f64 = 2.0;

const SHORT_CONTENT_CHARS: usize = 200;
const SHORT_CONTENT_PENALTY: f64 = 15.0;
const SUBSTANTIVE_MIN_CHARS: usize = 500;
const SUBSTANTIVE_MAX_CHARS: usize = 3000;
const SUBSTANTIVE_BONUS: f64 = 5.0;

const LINKS_MIN: usize = 2;
const LINKS_MAX: usize = 10;
const LINK_ADJUSTMENT: f64 = 5.0;

/// Unclamped, unrounded sum of all terms.
pub fn raw_score(s: &Signals) -> f64 {
    let mut score = f64::from(s.domain_reputation);

    score -= s.emotional_language_density * EMOTION_WEIGHT;

    if s.sensational_punctuation > PUNCTUATION_THRESHOLD {
        score -= s.sensational_punctuation.min(PUNCTUATION_CAP);
    }

    score += s.source_presence * SOURCE_WEIGHT;

    if s.caps_ratio > CAPS_THRESHOLD {
        score -= s.caps_ratio * CAPS_WEIGHT;
    }

    if s.content_length < SHORT_CONTENT_CHARS {
        score -= SHORT_CONTENT_PENALTY;
    }
    if s.content_length > SUBSTANTIVE_MIN_CHARS && s.content_length < SUBSTANTIVE_MAX_CHARS {
        score += SUBSTANTIVE_BONUS;
    }

    if (LINKS_MIN..=LINKS_MAX).contains(&s.url_count) {
        score += LINK_ADJUSTMENT;
    } else if s.url_count > LINKS_MAX {
        score -= LINK_ADJUSTMENT;
    }

    score
}

/// Final trust score in <0, 100>. Non-finite sums collapse to 0.
pub fn trust_score(s: &Signals) -> u8 {
    let raw = raw_score(s);
    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}
