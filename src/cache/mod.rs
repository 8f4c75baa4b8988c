//! Caching subsystem.
//!
//! - [`ResponseCache`]: clock-driven TTL cache over a bounded moka LRU,
//!   holding successful provider output. [`Tutor`](crate::Tutor) owns two:
//!   one for summaries and answers, one for study notes.
//! - [`CacheKey`]: unambiguous composite key built from every parameter
//!   that affects a response.

pub mod key;
pub mod response;

pub use key::CacheKey;
pub use response::{CacheConfig, CacheEntry, ResponseCache};
