//! Results handed back to callers

use serde::{Deserialize, Serialize};

/// Where a [`CompletionResult`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionSource {
    /// Fresh output from the named provider.
    Provider(String),
    /// A cached provider response younger than the TTL.
    Cache,
    /// Deterministic locally built text; no provider answered.
    Fallback,
}

/// Non-empty completion text with the time it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult {
    pub content: String,
    pub produced_at_ms: i64,
    pub source: CompletionSource,
}

impl CompletionResult {
    /// Whether this result is the canned fallback.
    pub fn is_fallback(&self) -> bool {
        self.source == CompletionSource::Fallback
    }
}

/// Structured chapter summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub summary: String,
    #[serde(rename = "keyPoints", alias = "key_points")]
    pub key_points: Vec<String>,
    pub concepts: Vec<String>,
}
