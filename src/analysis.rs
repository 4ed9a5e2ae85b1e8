//! analysis.rs: Input and output shapes of the credibility engine.
//!
//! Everything here is plain data: the engine fills these structs, the HTTP
//! boundary serializes them. Field names follow the wire contract consumed by
//! the UI (`trust_score`, `confidence_label`, flag `type`, ...).

use serde::{Deserialize, Serialize};

/// Single-use input for one analysis call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub content: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl AnalysisInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            url: None,
            title: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// URL or empty string (absent and empty are treated alike).
    pub fn url_str(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// Verification status of an extracted claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Verified,
    Unverified,
    Disputed,
    Misleading,
}

impl ClaimStatus {
    /// Canned assessment sentence attached to every claim with this status.
    pub fn reasoning(self) -> &'static str {
        match self {
            ClaimStatus::Verified => {
                "Claim includes attribution and appears to reference verifiable sources"
            }
            ClaimStatus::Unverified => "Claim lacks clear attribution or verifiable sources",
            ClaimStatus::Disputed => "Claim uses strong assertions without adequate evidence",
            ClaimStatus::Misleading => {
                "Claim contains sensational language that may distort facts"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Sequential, starting at 1.
    pub id: u32,
    /// Sentence text, at most 200 characters.
    pub text: String,
    pub status: ClaimStatus,
    /// In <0, 100>.
    pub confidence: u8,
    pub sources: Vec<String>,
    pub reasoning: String,
}

/// Severity of an evidence flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagType {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceFlag {
    #[serde(rename = "type")]
    pub kind: FlagType,
    pub category: String,
    pub description: String,
    pub details: String,
}

impl EvidenceFlag {
    pub fn new(
        kind: FlagType,
        category: impl Into<String>,
        description: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            category: category.into(),
            description: description.into(),
            details: details.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningStep {
    /// 1-based.
    pub step: u8,
    pub title: String,
    pub description: String,
    pub outcome: String,
}

impl ReasoningStep {
    pub fn new(
        step: u8,
        title: impl Into<String>,
        description: impl Into<String>,
        outcome: impl Into<String>,
    ) -> Self {
        Self {
            step,
            title: title.into(),
            description: description.into(),
            outcome: outcome.into(),
        }
    }
}

/// Ordered explanation trace of one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reasoning {
    pub steps: Vec<ReasoningStep>,
    pub summary: String,
    pub methodology: String,
}

/// The engine's sole output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Always in <0, 100>.
    pub trust_score: u8,
    pub confidence_label: String,
    pub content_type: String,
    pub claims: Vec<Claim>,
    pub flags: Vec<EvidenceFlag>,
    pub reasoning: Reasoning,
}

impl AnalysisResult {
    /// Neutral result for missing or empty content.
    pub fn no_content() -> Self {
        Self::placeholder(
            "No Analysis",
            "unknown",
            Claim {
                id: 1,
                text: "No content provided for analysis".into(),
                status: ClaimStatus::Unverified,
                confidence: 0,
                sources: Vec::new(),
                reasoning: "Empty content cannot be analyzed".into(),
            },
            EvidenceFlag::new(
                FlagType::Warning,
                "No Content",
                "No content available for analysis",
                "Please provide content to analyze.",
            ),
            "No content was provided for analysis.",
        )
    }

    /// Neutral result substituted when the analysis itself failed.
    /// `message` ends up in the flag details.
    pub fn analysis_error(message: impl Into<String>) -> Self {
        Self::placeholder(
            "Analysis Error",
            "unknown",
            Claim {
                id: 1,
                text: "Analysis could not be completed".into(),
                status: ClaimStatus::Unverified,
                confidence: 0,
                sources: Vec::new(),
                reasoning: "An internal error prevented claim assessment".into(),
            },
            EvidenceFlag::new(
                FlagType::Critical,
                "Analysis Error",
                "An error occurred while analyzing the content",
                message,
            ),
            "The analysis could not be completed; a neutral score was assigned.",
        )
    }

    fn placeholder(
        label: &str,
        content_type: &str,
        claim: Claim,
        flag: EvidenceFlag,
        summary: &str,
    ) -> Self {
        Self {
            trust_score: 50,
            confidence_label: label.to_string(),
            content_type: content_type.to_string(),
            claims: vec![claim],
            flags: vec![flag],
            reasoning: Reasoning {
                steps: vec![
                    ReasoningStep::new(
                        1,
                        "Content Extraction",
                        "Analyzed text content and linguistic patterns",
                        "No verifiable claims could be extracted",
                    ),
                    ReasoningStep::new(
                        2,
                        "Signal Analysis",
                        "Evaluated multiple credibility indicators",
                        "Signal analysis skipped",
                    ),
                    ReasoningStep::new(
                        3,
                        "Trust Score Calculation",
                        "Computed weighted score from all signals",
                        "Neutral trust score assigned: 50/100",
                    ),
                ],
                summary: summary.to_string(),
                methodology: "N/A".to_string(),
            },
        }
    }
}
