//! Public types for the Scholia API.

mod message;
mod notes;
mod provider;
mod request;
mod result;

pub use message::{Role, Turn};
pub use notes::NoteType;
pub use provider::{EndpointConfig, ProviderSpec};
pub use request::{CompletionRequest, MAX_PRIOR_TURNS};
pub use result::{ChapterSummary, CompletionResult, CompletionSource};
