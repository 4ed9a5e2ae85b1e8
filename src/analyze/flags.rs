//! Evidence flags: independent threshold checks over the signals.
//!
//! Checks run in table order and every firing check appends exactly one flag.
//! No dedup, no severity sort. Flag texts are fixed; they never quote the
//! measured values.

use super::signals::Signals;
use crate::analysis::{EvidenceFlag, FlagType};

struct FlagRule {
    kind: FlagType,
    category: &'static str,
    description: &'static str,
    details: &'static str,
    fires: fn(&Signals, &str) -> bool,
}

const FLAG_RULES: &[FlagRule] = &[
    FlagRule {
        kind: FlagType::Warning,
        category: "Emotional Language",
        description: "High density of emotional or sensational language detected",
        details: "Content uses emotionally charged words that may bias perception. Consider seeking additional neutral sources.",
        fires: emotional,
    },
    FlagRule {
        kind: FlagType::Warning,
        category: "Sensational Presentation",
        description: "Excessive use of exclamation marks detected",
        details: "Multiple exclamation marks often indicate sensationalism rather than factual reporting.",
        fires: sensational,
    },
    FlagRule {
        kind: FlagType::Warning,
        category: "Formatting Concerns",
        description: "Excessive use of all-caps text detected",
        details: "Heavy use of capitalization can indicate emotional appeals or lack of editorial standards.",
        fires: shouting,
    },
    FlagRule {
        kind: FlagType::Info,
        category: "Limited Source Attribution",
        description: "Few external sources or references found",
        details: "Content lacks clear attribution to external sources or research. Claims may be difficult to verify independently.",
        fires: few_sources,
    },
    FlagRule {
        kind: FlagType::Info,
        category: "Social Media Content",
        description: "Content from social media or user-generated platform",
        details: "Social media content has less editorial oversight. Verify claims through multiple independent sources.",
        fires: low_reputation,
    },
    FlagRule {
        kind: FlagType::Info,
        category: "Reputable Source",
        description: "Content from established institutional or news source",
        details: "Source has established editorial standards and fact-checking processes.",
        fires: high_reputation,
    },
    FlagRule {
        kind: FlagType::Warning,
        category: "Minimal Context",
        description: "Very brief content with limited detail",
        details: "Short content may lack necessary context for understanding claims. Seek additional information.",
        fires: short,
    },
    FlagRule {
        kind: FlagType::Info,
        category: "Well-Referenced",
        description: "Multiple sources or references cited",
        details: "Content includes references to external sources, enabling independent verification.",
        fires: well_sourced,
    },
];

fn emotional(s: &Signals, _: &str) -> bool {
    s.emotional_language_density > 2.0
}

fn sensational(s: &Signals, content: &str) -> bool {
    s.exclamation_count > 5 || content.contains("!!!")
}

fn shouting(s: &Signals, _: &str) -> bool {
    s.caps_ratio > 5.0
}

fn few_sources(s: &Signals, _: &str) -> bool {
    s.source_presence < 2.0
}

fn low_reputation(s: &Signals, _: &str) -> bool {
    s.domain_reputation < 40
}

fn high_reputation(s: &Signals, _: &str) -> bool {
    s.domain_reputation > 85
}

fn short(s: &Signals, _: &str) -> bool {
    s.content_length < 200
}

fn well_sourced(s: &Signals, _: &str) -> bool {
    s.source_presence >= 5.0
}

pub fn generate(signals: &Signals, content: &str) -> Vec<EvidenceFlag> {
    FLAG_RULES
        .iter()
        .filter(|rule| (rule.fires)(signals, content))
        .map(|rule| EvidenceFlag::new(rule.kind, rule.category, rule.description, rule.details))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> Signals {
        Signals {
            emotional_language_density: 0.0,
            sensational_punctuation: 0.0,
            domain_reputation: 60,
            source_presence: 2.0,
            content_length: 800,
            caps_ratio: 0.0,
            exclamation_count: 0,
            question_count: 0,
            url_count: 0,
            readability_score: 70.0,
        }
    }

    fn categories(flags: &[EvidenceFlag]) -> Vec<&str> {
        flags.iter().map(|f| f.category.as_str()).collect()
    }

    #[test]
    fn quiet_signals_raise_nothing() {
        assert!(generate(&quiet(), "calm text").is_empty());
    }

    #[test]
    fn flags_keep_check_order() {
        let s = Signals {
            emotional_language_density: 3.0,
            exclamation_count: 6,
            caps_ratio: 10.0,
            source_presence: 0.0,
            domain_reputation: 30,
            content_length: 50,
            ..quiet()
        };
        let flags = generate(&s, "x");
        assert_eq!(
            categories(&flags),
            vec![
                "Emotional Language",
                "Sensational Presentation",
                "Formatting Concerns",
                "Limited Source Attribution",
                "Social Media Content",
                "Minimal Context",
            ]
        );
        assert_eq!(flags[0].kind, FlagType::Warning);
        assert_eq!(flags[3].kind, FlagType::Info);
    }

    #[test]
    fn triple_bang_alone_is_sensational() {
        let flags = generate(&quiet(), "Wow!!!");
        assert_eq!(categories(&flags), vec!["Sensational Presentation"]);
    }

    #[test]
    fn reputation_edges() {
        let s = Signals {
            domain_reputation: 90,
            source_presence: 6.0,
            ..quiet()
        };
        assert_eq!(
            categories(&generate(&s, "")),
            vec!["Reputable Source", "Well-Referenced"]
        );
        let s = Signals {
            domain_reputation: 85,
            ..quiet()
        };
        assert!(generate(&s, "").is_empty());
        let s = Signals {
            domain_reputation: 40,
            ..quiet()
        };
        assert!(generate(&s, "").is_empty());
    }
}
