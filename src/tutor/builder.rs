//! Builder for configuring tutor instances

use std::sync::Arc;

use super::Tutor;
use crate::cache::{CacheConfig, ResponseCache};
use crate::clock::{Clock, SystemClock};
use crate::config::{GenerationConfig, TimeoutConfig, TutorConfig};
use crate::providers::{CompletionProvider, OpenAiCompatibleProvider, ProviderChain};
use crate::types::ProviderSpec;
use crate::{Result, ScholiaError};

/// A chain entry waiting for `build()`; specs become HTTP clients then.
enum PendingProvider {
    Spec(ProviderSpec),
    Custom(Arc<dyn CompletionProvider>),
}

/// Builder for configuring tutor instances.
///
/// Providers keep the order they were added in, whichever method added
/// them. Nothing is contacted until the first tutoring call.
pub struct TutorBuilder {
    pending: Vec<PendingProvider>,
    clock: Option<Arc<dyn Clock>>,
    timeouts: TimeoutConfig,
    cache: CacheConfig,
    generation: GenerationConfig,
    preferred: Option<String>,
    http_client: Option<reqwest::Client>,
}

impl TutorBuilder {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            clock: None,
            timeouts: TimeoutConfig::default(),
            cache: CacheConfig::default(),
            generation: GenerationConfig::default(),
            preferred: None,
            http_client: None,
        }
    }

    /// Append a ready-made provider (lowest priority so far).
    pub fn provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.pending.push(PendingProvider::Custom(provider));
        self
    }

    /// Append an OpenAI-compatible endpoint.
    pub fn provider_spec(mut self, spec: ProviderSpec) -> Self {
        self.pending.push(PendingProvider::Spec(spec));
        self
    }

    /// Append several OpenAI-compatible endpoints in order.
    pub fn providers(mut self, specs: impl IntoIterator<Item = ProviderSpec>) -> Self {
        self.pending
            .extend(specs.into_iter().map(PendingProvider::Spec));
        self
    }

    /// Apply a loaded configuration.
    ///
    /// Replaces timeouts, cache settings, sampling parameters and the
    /// preferred provider, and appends the configured providers with keys
    /// read from the environment.
    pub fn config(mut self, config: TutorConfig) -> Self {
        self.timeouts = config.timeouts;
        self.cache = config.cache.into();
        self.generation = config.generation;
        if config.preferred.is_some() {
            self.preferred = config.preferred.clone();
        }
        let specs = config.provider_specs();
        self.providers(specs)
    }

    /// Set the clock used for cache freshness and result timestamps
    /// (default: wall clock).
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set per-attempt timeouts.
    pub fn timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Set capacity and TTL for both response caches.
    pub fn cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Set sampling parameters per operation.
    pub fn generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Move the named provider to the front of the chain at build time.
    pub fn preferred(mut self, name: impl Into<String>) -> Self {
        self.preferred = Some(name.into());
        self
    }

    /// Share an existing HTTP client across all spec-built providers.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the tutor.
    pub fn build(self) -> Result<Tutor> {
        if self.pending.is_empty() {
            return Err(ScholiaError::NoProvider);
        }

        // One connection pool for every endpoint
        let http_client = self.http_client.unwrap_or_default();

        let mut chain = ProviderChain::new();
        for pending in self.pending {
            let provider: Arc<dyn CompletionProvider> = match pending {
                PendingProvider::Spec(spec) => Arc::new(OpenAiCompatibleProvider::with_http_client(
                    spec,
                    http_client.clone(),
                )),
                PendingProvider::Custom(provider) => provider,
            };
            chain.add(provider);
        }

        if let Some(name) = &self.preferred {
            chain.promote(name);
        }

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let fingerprint = chain.fingerprint();

        Ok(Tutor {
            chain,
            fingerprint,
            responses: ResponseCache::new("responses", &self.cache, clock.clone()),
            notes: ResponseCache::new("notes", &self.cache, clock.clone()),
            clock,
            timeouts: self.timeouts,
            generation: self.generation,
        })
    }
}

impl Default for TutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
