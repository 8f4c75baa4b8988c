//! Scholia - AI tutoring over a chain of fallback language models
//!
//! This crate turns chapter text into summaries, answers and study notes
//! by asking an ordered list of OpenAI-compatible providers in turn. Each
//! attempt is bounded by a timeout; when every provider fails the caller
//! still gets deterministic, locally built content. Successful responses
//! are cached for a few minutes.
//!
//! # Example
//!
//! ```rust,no_run
//! use scholia::{NoteType, Tutor, TutorConfig};
//!
//! #[tokio::main]
//! async fn main() -> scholia::Result<()> {
//!     let tutor = Tutor::from_config(TutorConfig::load(None)?)?;
//!
//!     let summary = tutor
//!         .generate_summary("Cell Biology", "Cells are the basic unit of life. ...")
//!         .await;
//!     println!("{}", summary.summary);
//!
//!     let notes = tutor
//!         .generate_notes("Cell Biology", "...", NoteType::Flashcards, None)
//!         .await;
//!     println!("{}", notes.content);
//!     Ok(())
//! }
//! ```
//!
//! # Custom providers
//!
//! Anything implementing [`CompletionProvider`] can sit in the chain:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scholia::{OpenAiCompatibleProvider, ProviderSpec, Tutor};
//!
//! # fn main() -> scholia::Result<()> {
//! let local = OpenAiCompatibleProvider::new(ProviderSpec::new(
//!     "ollama",
//!     "http://localhost:11434/v1",
//!     "",
//!     "llama3",
//! ));
//! let tutor = Tutor::builder().provider(Arc::new(local)).build()?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod fallback;
pub mod prompts;
pub mod providers;
pub mod telemetry;
pub mod tutor;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use cache::CacheConfig;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TutorConfig;
pub use error::{Result, ScholiaError};
pub use providers::{CompletionProvider, OpenAiCompatibleProvider, ProviderChain};
pub use tutor::{Tutor, TutorBuilder};

// Re-export all types
pub use types::{
    ChapterSummary, CompletionRequest, CompletionResult, CompletionSource, EndpointConfig,
    NoteType, ProviderSpec, Role, Turn,
};
