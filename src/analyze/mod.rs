// src/analyze/mod.rs
//! Heuristic analysis engine: signals → claims → score → flags → reasoning.
//!
//! `HeuristicEngine` is pure and synchronous: no I/O, no clock, no shared
//! mutable state. Identical inputs always produce identical results.
//! `EngineHandle` wraps an engine for the server and hot-reloads the lexicon
//! file on mtime change.

pub mod claims;
pub mod content_type;
pub mod flags;
pub mod lexicon;
pub mod reasoning;
pub mod scoring;
pub mod signals;

use anyhow::{ensure, Result};
use once_cell::sync::Lazy;
use std::{
    fs,
    path::PathBuf,
    sync::{Arc, PoisonError, RwLock},
    time::SystemTime,
};
use tracing::{debug, info, warn};

use crate::analysis::{AnalysisInput, AnalysisResult};
use crate::logging::anon_hash;

// Re-export convenient types.
pub use crate::analyze::claims::ClaimExtractor;
pub use crate::analyze::content_type::ContentType;
pub use crate::analyze::lexicon::{load_lexicon_file, DomainTier, Lexicon, DEFAULT_LEXICON_PATH};
pub use crate::analyze::signals::Signals;

static DEFAULT_ENGINE: Lazy<HeuristicEngine> = Lazy::new(|| {
    HeuristicEngine::new(Arc::new(Lexicon::default())).expect("built-in lexicon compiles")
});

/// Analyze with the built-in lexicon.
pub fn analyze(input: &AnalysisInput) -> AnalysisResult {
    DEFAULT_ENGINE.analyze(input)
}

#[derive(Debug, Clone)]
pub struct HeuristicEngine {
    lexicon: Arc<Lexicon>,
    claims: ClaimExtractor,
}

impl Default for HeuristicEngine {
    fn default() -> Self {
        DEFAULT_ENGINE.clone()
    }
}

impl HeuristicEngine {
    /// Fails only if the claim-verb matcher cannot be compiled.
    pub fn new(lexicon: Arc<Lexicon>) -> Result<Self> {
        let claims = ClaimExtractor::new(&lexicon)?;
        Ok(Self { lexicon, claims })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn signals(&self, input: &AnalysisInput) -> Signals {
        signals::extract(
            &input.content,
            input.url_str(),
            input.title_str(),
            &self.lexicon,
        )
    }

    /// Full pipeline. Empty or whitespace-only content yields the
    /// "No Analysis" result. Errors only on internal numeric failure.
    pub fn try_analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult> {
        if input.content.trim().is_empty() {
            return Ok(AnalysisResult::no_content());
        }

        let signals = self.signals(input);
        ensure!(
            signals.is_finite(),
            "non-finite signal values for input {}",
            anon_hash(&input.content)
        );

        let claims = self.claims.extract(&input.content, &self.lexicon);
        let trust_score = scoring::trust_score(&signals);
        let flags = flags::generate(&signals, &input.content);
        let reasoning = reasoning::synthesize(&signals, trust_score, claims.len());

        debug!(
            target: "analysis",
            id = %anon_hash(&input.content),
            trust_score,
            claims = claims.len(),
            flags = flags.len(),
            domain_reputation = signals.domain_reputation,
            "analysis complete"
        );

        Ok(AnalysisResult {
            trust_score,
            confidence_label: reasoning::confidence_label(trust_score),
            content_type: content_type::classify(input.url_str(), &input.content)
                .as_str()
                .to_string(),
            claims,
            flags,
            reasoning,
        })
    }

    /// Total variant of `try_analyze`: failures become the "Analysis Error" result.
    pub fn analyze(&self, input: &AnalysisInput) -> AnalysisResult {
        match self.try_analyze(input) {
            Ok(r) => r,
            Err(e) => {
                warn!(target: "analysis", error = %e, "analysis failed; using fallback");
                AnalysisResult::analysis_error(format!("{e:#}"))
            }
        }
    }
}

/* ----------------------------
Thread-safe handle + hot reload
---------------------------- */

/// Shared engine for the server. With a lexicon path configured, every
/// `current()` call checks the file mtime and rebuilds the engine when it
/// changed. A broken file keeps the previous engine.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    path: Option<PathBuf>,
    inner: Arc<RwLock<Loaded>>,
}

#[derive(Debug)]
struct Loaded {
    engine: Arc<HeuristicEngine>,
    last_modified: Option<SystemTime>,
}

impl EngineHandle {
    /// Fixed engine, never reloaded.
    pub fn new(engine: HeuristicEngine) -> Self {
        Self {
            path: None,
            inner: Arc::new(RwLock::new(Loaded {
                engine: Arc::new(engine),
                last_modified: None,
            })),
        }
    }

    /// Built-in lexicon, overridden by `path` whenever that file exists.
    pub fn watching(path: impl Into<PathBuf>) -> Self {
        let handle = Self {
            path: Some(path.into()),
            ..Self::new(HeuristicEngine::default())
        };
        // Prime from disk right away.
        let _ = handle.current();
        handle
    }

    pub fn current(&self) -> Arc<HeuristicEngine> {
        let Some(path) = &self.path else {
            return self.snapshot();
        };

        // Missing file → keep whatever is loaded.
        let Ok(mtime) = fs::metadata(path).and_then(|m| m.modified()) else {
            return self.snapshot();
        };

        let changed = {
            let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            guard.last_modified != Some(mtime)
        };
        if !changed {
            return self.snapshot();
        }

        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        // Double-check in case another caller reloaded meanwhile.
        if guard.last_modified != Some(mtime) {
            guard.last_modified = Some(mtime);
            match load_lexicon_file(path).and_then(|lex| HeuristicEngine::new(Arc::new(lex))) {
                Ok(engine) => {
                    info!(target: "lexicon", path = %path.display(), "lexicon reloaded");
                    guard.engine = Arc::new(engine);
                }
                Err(e) => {
                    warn!(target: "lexicon", path = %path.display(), error = %format!("{e:#}"), "lexicon reload failed; keeping previous");
                }
            }
        }
        guard.engine.clone()
    }

    fn snapshot(&self) -> Arc<HeuristicEngine> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .engine
            .clone()
    }
}
