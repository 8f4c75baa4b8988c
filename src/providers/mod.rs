//! Completion providers and the fallback chain that drives them.

pub mod chain;
pub mod defaults;
pub mod openai;
pub(crate) mod routing;
pub mod traits;

pub use chain::{Completion, ProviderChain};
pub use openai::OpenAiCompatibleProvider;
pub use traits::CompletionProvider;
