//! Composite cache keys.
//!
//! A [`CacheKey`] is the operation name followed by named, length-prefixed
//! segments. Length prefixes keep verbatim fields unambiguous: no choice of
//! field values can make two different parameter sets render to the same
//! string. Large inputs (subject content) go in as length plus a 64-bit
//! hash digest instead of verbatim, so two different contents of the same
//! length could in principle share a key.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Builder for a cache key string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    buf: String,
}

impl CacheKey {
    /// Start a key for a logical operation.
    pub fn new(operation: &str) -> Self {
        let mut key = Self { buf: String::new() };
        key.push("op", operation);
        key
    }

    /// Append a named value verbatim.
    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.push(name, value);
        self
    }

    /// Append an optional value. `None` and `Some("")` stay distinct.
    pub fn opt_field(mut self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.push(name, v),
            None => {
                self.buf.push_str(name);
                self.buf.push_str("=~;");
            }
        }
        self
    }

    /// Append a hash digest of `value` instead of the value itself.
    ///
    /// Uses `DefaultHasher` (SipHash), stable within a process lifetime,
    /// which is all an in-memory cache needs.
    pub fn digest(mut self, name: &str, value: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        let hex = format!("{:016x}", hasher.finish());
        // length is included so digests of different-length inputs never collide
        self.push(name, &format!("{}:{hex}", value.len()));
        self
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    fn push(&mut self, name: &str, value: &str) {
        use std::fmt::Write;
        // writing to a String cannot fail
        let _ = write!(self.buf, "{name}={}:{value};", value.len());
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.buf
    }
}
