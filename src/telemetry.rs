//! Telemetry metric name constants.
//!
//! Centralised metric names for scholia operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `scholia_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider`: provider name (e.g. "openrouter-llama-3.3-70b")
//! - `operation`: tutoring operation ("summary", "answer", "notes")
//! - `status`: attempt outcome: "ok", "error", "timeout" or "empty"
//! - `cache`: which response cache ("responses" or "notes")

/// Total provider attempts made by the fallback chain.
///
/// Labels: `provider`, `operation`, `status`.
pub const ATTEMPTS_TOTAL: &str = "scholia_attempts_total";

/// Duration of a single provider attempt in seconds.
///
/// Labels: `provider`, `operation`.
pub const ATTEMPT_DURATION_SECONDS: &str = "scholia_attempt_duration_seconds";

/// Total times a canned fallback was served instead of model output.
///
/// Labels: `operation`, `reason` ("exhausted" | "malformed").
pub const FALLBACKS_TOTAL: &str = "scholia_fallbacks_total";

/// Total cache hits.
///
/// Labels: `cache`.
pub const CACHE_HITS_TOTAL: &str = "scholia_cache_hits_total";

/// Total cache misses (absent or stale).
///
/// Labels: `cache`.
pub const CACHE_MISSES_TOTAL: &str = "scholia_cache_misses_total";
