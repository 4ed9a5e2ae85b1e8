// src/config/app.rs
//! Service configuration (`config/analyzer.toml`).
//!
//! ```toml
//! [server]
//! pacing_delay_ms = 0
//! history_capacity = 2000
//!
//! [lexicon]
//! path = "config/lexicon.json"
//! hot_reload = true
//! ```
//!
//! Resolution: $ANALYZER_CONFIG_PATH (must exist) → config/analyzer.toml →
//! built-in defaults. $ANALYZER_PACING_DELAY_MS overrides the pacing delay.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::warn;

use crate::analyze::{
    load_lexicon_file, EngineHandle, HeuristicEngine, DEFAULT_LEXICON_PATH,
};
use crate::history::MAX_CAPACITY;

pub const ENV_CONFIG_PATH: &str = "ANALYZER_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/analyzer.toml";
pub const ENV_PACING_DELAY_MS: &str = "ANALYZER_PACING_DELAY_MS";

const DEFAULT_HISTORY_CAPACITY: usize = 2000;
/// Anything above a minute is certainly a typo.
const MAX_PACING_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Artificial delay before answering `/analyze`. 0 disables it.
    pub pacing_delay_ms: u64,
    pub history_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            pacing_delay_ms: 0,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub path: PathBuf,
    pub hot_reload: bool,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LEXICON_PATH),
            hot_reload: true,
        }
    }
}

impl LexiconConfig {
    /// With hot reload the handle follows the file; otherwise the file is read
    /// once (if present) and a broken file is an error.
    pub fn engine_handle(&self) -> Result<EngineHandle> {
        if self.hot_reload {
            return Ok(EngineHandle::watching(&self.path));
        }
        if !self.path.exists() {
            return Ok(EngineHandle::new(HeuristicEngine::default()));
        }
        let lex = load_lexicon_file(&self.path)?;
        Ok(EngineHandle::new(HeuristicEngine::new(Arc::new(lex))?))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub lexicon: LexiconConfig,
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: AppConfig = toml::from_str(s).context("parsing analyzer config")?;
        cfg.sanitize();
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading analyzer config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Env var → default file → defaults, then env overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Self::load_from(&default)?
            } else {
                Self::default()
            }
        };

        if let Some(ms) = parse_pacing_env(std::env::var(ENV_PACING_DELAY_MS).ok()) {
            cfg.server.pacing_delay_ms = ms;
        }
        cfg.sanitize();
        Ok(cfg)
    }

    fn sanitize(&mut self) {
        self.server.history_capacity = self.server.history_capacity.min(MAX_CAPACITY);
        self.server.pacing_delay_ms = self.server.pacing_delay_ms.min(MAX_PACING_DELAY_MS);
    }
}

/// Unparseable values are ignored with a warning.
fn parse_pacing_env(raw: Option<String>) -> Option<u64> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(value = %raw, "ignoring invalid {ENV_PACING_DELAY_MS}");
            None
        }
    }
}
