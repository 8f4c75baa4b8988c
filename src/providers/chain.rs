//! Ordered provider chain with per-attempt timeouts.
//!
//! The `ProviderChain` stores providers in priority order (index 0 =
//! highest). A request is sent to each provider in turn until one returns
//! non-empty content. Every kind of failure falls through to the next
//! provider; there are no terminal errors and no retries within a
//! provider.
//!
//! # Fallback Triggers
//!
//! - any `Err` from the provider (network, non-2xx, auth, rate limit, decode)
//! - the attempt outliving its timeout
//! - `Ok` content that is empty or whitespace-only
//!
//! # Fallback Chain Flow
//!
//! ```text
//! tutor.answer_question(..)
//!                     │
//!                     ▼
//!         ┌─────────────────────┐
//!         │   ProviderChain     │
//!         └─────────┬───────────┘
//!                   │ try in order, each raced against the timeout
//!                   ▼
//!         ┌─────────────────────┐
//!         │  openrouter-llama   │ ──► error / timeout / empty
//!         │  (priority 0)       │
//!         └─────────┬───────────┘
//!                   ▼
//!         ┌─────────────────────┐
//!         │  groq-llama         │ ──► non-empty content: return
//!         │  (priority 1)       │
//!         └─────────┬───────────┘
//!                   ▼ (only if every provider failed)
//!         ┌─────────────────────┐
//!         │  canned fallback    │ ──► deterministic text, never fails
//!         └─────────────────────┘
//! ```
//!
//! # Cancellation
//!
//! Each attempt runs under [`tokio::time::timeout`]. When the timer wins,
//! the provider future is dropped, which aborts its in-flight HTTP request.
//! A late response can therefore never reach the caller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use super::routing::promote_preferred;
use super::traits::CompletionProvider;
use crate::clock::Clock;
use crate::telemetry;
use crate::types::{CompletionRequest, CompletionResult, CompletionSource};
use crate::{Result, ScholiaError};

/// Successful output of one chain execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Name of the provider that answered.
    pub provider: String,
    pub content: String,
}

/// Registry of completion providers with fallback chain semantics.
#[derive(Default, Clone)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn CompletionProvider>>,
}

impl ProviderChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chain from providers already in priority order.
    pub fn with_providers(providers: Vec<Arc<dyn CompletionProvider>>) -> Self {
        Self { providers }
    }

    /// Add a provider (appended to end of chain = lowest priority).
    pub fn add(&mut self, provider: Arc<dyn CompletionProvider>) {
        self.providers.push(provider);
    }

    /// Move the named provider to the front. No-op if it isn't registered.
    pub fn promote(&mut self, preferred: &str) {
        promote_preferred(&mut self.providers, preferred);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Provider names in priority order.
    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Identity of the whole chain, for cache keys.
    ///
    /// Two chains with the same providers and models in the same order
    /// yield the same fingerprint.
    pub fn fingerprint(&self) -> String {
        self.providers
            .iter()
            .map(|p| format!("{}={}", p.name(), p.model()))
            .collect::<Vec<_>>()
            .join(",")
    }

    // ========================================================================
    // Chain execution
    // ========================================================================

    /// Try each provider in order until one returns non-empty content.
    ///
    /// Returns `NoProvider` for an empty chain and `ChainExhausted` when
    /// every provider failed. Callers that must never fail should use
    /// [`attempt_or_fallback`](Self::attempt_or_fallback).
    #[instrument(skip(self, request), fields(providers = self.providers.len()))]
    pub async fn attempt(
        &self,
        operation: &'static str,
        request: &CompletionRequest,
        per_attempt_timeout: Duration,
    ) -> Result<Completion> {
        if self.providers.is_empty() {
            return Err(ScholiaError::NoProvider);
        }

        for provider in &self.providers {
            let start = Instant::now();
            let outcome =
                match tokio::time::timeout(per_attempt_timeout, provider.complete(request)).await {
                    Ok(Ok(content)) if !content.trim().is_empty() => Ok(content),
                    Ok(Ok(_)) => Err(ScholiaError::EmptyResponse),
                    Ok(Err(e)) => Err(e),
                    Err(_elapsed) => Err(ScholiaError::Timeout(per_attempt_timeout)),
                };

            match outcome {
                Ok(content) => {
                    Self::record_attempt(operation, provider.name(), start, "ok");
                    return Ok(Completion {
                        provider: provider.name().to_string(),
                        content,
                    });
                }
                Err(e) => {
                    let status = match &e {
                        ScholiaError::Timeout(_) => "timeout",
                        ScholiaError::EmptyResponse => "empty",
                        _ => "error",
                    };
                    Self::record_attempt(operation, provider.name(), start, status);
                    warn!(
                        provider = provider.name(),
                        model = provider.model(),
                        operation,
                        transient = e.is_transient(),
                        error = %e,
                        "provider attempt failed, trying next"
                    );
                }
            }
        }

        Err(ScholiaError::ChainExhausted {
            attempts: self.providers.len(),
        })
    }

    /// Run the chain and never fail.
    ///
    /// On success the result carries the provider's text. When the chain
    /// is exhausted (or empty), `fallback` builds the content locally.
    pub async fn attempt_or_fallback<F>(
        &self,
        operation: &'static str,
        request: &CompletionRequest,
        per_attempt_timeout: Duration,
        clock: &dyn Clock,
        fallback: F,
    ) -> CompletionResult
    where
        F: FnOnce() -> String,
    {
        match self.attempt(operation, request, per_attempt_timeout).await {
            Ok(completion) => CompletionResult {
                content: completion.content,
                produced_at_ms: clock.now_millis(),
                source: CompletionSource::Provider(completion.provider),
            },
            Err(e) => {
                Self::record_fallback(operation, "exhausted");
                info!(operation, error = %e, "serving canned fallback");
                CompletionResult {
                    content: fallback(),
                    produced_at_ms: clock.now_millis(),
                    source: CompletionSource::Fallback,
                }
            }
        }
    }

    // ========================================================================
    // Metrics recording
    // ========================================================================

    /// Record attempt outcome metrics (counter + histogram).
    fn record_attempt(operation: &'static str, provider: &str, start: Instant, status: &'static str) {
        metrics::counter!(telemetry::ATTEMPTS_TOTAL,
            "provider" => provider.to_owned(),
            "operation" => operation,
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::ATTEMPT_DURATION_SECONDS,
            "provider" => provider.to_owned(),
            "operation" => operation,
        )
        .record(start.elapsed().as_secs_f64());
    }

    /// Record that a canned fallback replaced model output.
    pub(crate) fn record_fallback(operation: &'static str, reason: &'static str) {
        metrics::counter!(telemetry::FALLBACKS_TOTAL,
            "operation" => operation,
            "reason" => reason,
        )
        .increment(1);
    }
}

impl std::fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderChain")
            .field("providers", &self.names())
            .finish()
    }
}
