//! Provider trait for completion backends.
//!
//! The chain only needs one capability from a backend: turn a
//! [`CompletionRequest`] into text. Keeping the seam this narrow lets tests
//! script provider behaviour (fail, stall, answer empty) without HTTP.
//!
//! # Failure semantics
//!
//! Any `Err` makes the chain move on to the next provider. An `Ok` with
//! empty or whitespace-only content is treated the same way; providers do
//! not need to check for it themselves.

use async_trait::async_trait;

use crate::Result;
use crate::types::CompletionRequest;

/// Backend that produces a single chat completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging/metrics.
    fn name(&self) -> &str;

    /// Model identifier sent to the backend.
    fn model(&self) -> &str;

    /// Non-streaming completion. Returns the raw message text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
