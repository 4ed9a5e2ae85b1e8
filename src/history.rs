//! history.rs: bounded in-memory log of evaluations for `/debug/history`.
//!
//! Oldest entries are dropped first. Never read by the engine.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::evaluation::Evaluation;

/// Hard upper bound regardless of configuration.
pub const MAX_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub confidence_label: String,
    #[serde(flatten)]
    pub evaluation: Evaluation,
}

#[derive(Debug)]
pub struct EvaluationHistory {
    inner: Mutex<Vec<HistoryEntry>>,
    cap: usize,
}

impl EvaluationHistory {
    pub fn with_capacity(cap: usize) -> Self {
        let cap = cap.min(MAX_CAPACITY);
        Self {
            inner: Mutex::new(Vec::with_capacity(cap)),
            cap,
        }
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn push(&self, entry: HistoryEntry) {
        if self.cap == 0 {
            return;
        }
        let mut v = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    /// Up to `n` most recent entries, oldest first.
    pub fn snapshot_last_n(&self, n: usize) -> Vec<HistoryEntry> {
        let v = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let start = v.len().saturating_sub(n);
        v[start..].to_vec()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
