//! The tutoring service: summaries, answers and study notes.
//!
//! [`Tutor`] owns the provider chain and two response caches. Every
//! operation follows the same path:
//!
//! ```text
//! cache hit? ──yes──► cached content
//!     │ no
//!     ▼
//! ProviderChain::attempt ──ok──► cache + return
//!     │ exhausted
//!     ▼
//! deterministic fallback (never cached)
//! ```
//!
//! None of the three operations can fail.

mod builder;
mod summary;

pub use builder::TutorBuilder;
pub use summary::parse_summary;

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::cache::{CacheKey, ResponseCache};
use crate::clock::Clock;
use crate::config::{GenerationConfig, GenerationParams, TimeoutConfig, TutorConfig};
use crate::fallback;
use crate::prompts::{self, Prompt};
use crate::providers::ProviderChain;
use crate::types::{
    ChapterSummary, CompletionRequest, CompletionResult, CompletionSource, NoteType, Turn,
};
use crate::Result;

const OP_SUMMARY: &str = "summary";
const OP_ANSWER: &str = "answer";
const OP_NOTES: &str = "notes";

/// AI tutor backed by an ordered provider chain.
pub struct Tutor {
    chain: ProviderChain,
    /// Chain identity, part of every cache key.
    fingerprint: String,
    /// Summaries and answers.
    responses: ResponseCache,
    notes: ResponseCache,
    clock: Arc<dyn Clock>,
    timeouts: TimeoutConfig,
    generation: GenerationConfig,
}

impl Tutor {
    /// Create a new builder.
    pub fn builder() -> TutorBuilder {
        TutorBuilder::new()
    }

    /// Build a tutor from a loaded configuration.
    pub fn from_config(config: TutorConfig) -> Result<Self> {
        TutorBuilder::new().config(config).build()
    }

    /// Summarize a chapter.
    ///
    /// A reply that is not a valid summary object is replaced by the canned
    /// summary rather than passed to the next provider.
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    pub async fn generate_summary(&self, title: &str, content: &str) -> ChapterSummary {
        let key = self
            .key(OP_SUMMARY)
            .field("title", title)
            .digest("content", content)
            .into_string();

        if let Some(cached) = self.responses.get(&key) {
            match parse_summary(&cached) {
                Ok(summary) => return summary,
                Err(e) => warn!(error = %e, "discarding unparseable cached summary"),
            }
        }

        let request = Self::request(prompts::summary(title, content), self.generation.summary);
        match self
            .chain
            .attempt(OP_SUMMARY, &request, self.timeouts.summary())
            .await
        {
            Ok(completion) => match parse_summary(&completion.content) {
                Ok(summary) => {
                    self.responses.put(key, completion.content);
                    summary
                }
                Err(e) => {
                    ProviderChain::record_fallback(OP_SUMMARY, "malformed");
                    warn!(provider = %completion.provider, error = %e, "malformed summary, serving canned fallback");
                    fallback::summary_fallback(title)
                }
            },
            Err(e) => {
                ProviderChain::record_fallback(OP_SUMMARY, "exhausted");
                info!(error = %e, "serving canned summary");
                fallback::summary_fallback(title)
            }
        }
    }

    /// Answer a question about a chapter.
    ///
    /// Only the last four turns of `history` are sent, and only those take
    /// part in the cache key.
    #[instrument(skip(self, content, history), fields(turns = history.len()))]
    pub async fn answer_question(
        &self,
        question: &str,
        title: &str,
        content: &str,
        history: &[Turn],
    ) -> CompletionResult {
        let request = Self::request(prompts::answer(question, title, content), self.generation.answer)
            .history(history);

        let mut key = self
            .key(OP_ANSWER)
            .field("question", question.trim())
            .field("title", title)
            .digest("content", content);
        for turn in request.prior_turns() {
            key = key.field(turn.role.as_str(), &turn.content);
        }
        let key = key.into_string();

        if let Some(hit) = Self::cached(&self.responses, &key) {
            return hit;
        }

        let result = self
            .chain
            .attempt_or_fallback(
                OP_ANSWER,
                &request,
                self.timeouts.answer(),
                self.clock.as_ref(),
                || fallback::answer_fallback(question, title, content),
            )
            .await;
        Self::store(&self.responses, key, &result);
        result
    }

    /// Generate study notes of the requested type.
    #[instrument(skip(self, content, custom_prompt), fields(note_type = %note_type))]
    pub async fn generate_notes(
        &self,
        title: &str,
        content: &str,
        note_type: NoteType,
        custom_prompt: Option<&str>,
    ) -> CompletionResult {
        let key = self
            .key(OP_NOTES)
            .field("title", title)
            .field("type", note_type.as_str())
            .opt_field("custom", custom_prompt)
            .digest("content", content)
            .into_string();

        if let Some(hit) = Self::cached(&self.notes, &key) {
            return hit;
        }

        let request = Self::request(
            prompts::notes(title, content, note_type, custom_prompt),
            self.generation.notes,
        );
        let result = self
            .chain
            .attempt_or_fallback(
                OP_NOTES,
                &request,
                self.timeouts.notes(),
                self.clock.as_ref(),
                || fallback::notes_fallback(title, content, note_type),
            )
            .await;
        Self::store(&self.notes, key, &result);
        result
    }

    /// Provider names in the order they are tried.
    pub fn provider_names(&self) -> Vec<String> {
        self.chain.names()
    }

    /// Drop every cached response.
    pub fn clear_caches(&self) {
        self.responses.clear();
        self.notes.clear();
    }

    /// Remove stale entries from both caches. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.responses.purge_expired() + self.notes.purge_expired()
    }

    fn key(&self, operation: &str) -> CacheKey {
        CacheKey::new(operation).field("chain", &self.fingerprint)
    }

    fn request(prompt: Prompt, params: GenerationParams) -> CompletionRequest {
        CompletionRequest::new(prompt.system, prompt.user)
            .temperature(params.temperature)
            .max_tokens(params.max_tokens)
    }

    fn cached(cache: &ResponseCache, key: &str) -> Option<CompletionResult> {
        cache.get_entry(key).map(|entry| CompletionResult {
            content: entry.content,
            produced_at_ms: entry.stored_at_ms,
            source: CompletionSource::Cache,
        })
    }

    /// Cache provider output; fallbacks are never stored.
    fn store(cache: &ResponseCache, key: String, result: &CompletionResult) {
        if let CompletionSource::Provider(_) = result.source {
            cache.put(key, result.content.clone());
        }
    }
}

impl std::fmt::Debug for Tutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tutor")
            .field("chain", &self.chain)
            .field("timeouts", &self.timeouts)
            .field("responses", &self.responses)
            .field("notes", &self.notes)
            .finish()
    }
}
