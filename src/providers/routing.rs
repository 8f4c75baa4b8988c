//! Preferred-provider routing.
//!
//! When a preferred provider is configured, it is moved to position 0 of
//! the fallback chain. Other providers keep their original relative order
//! as fallbacks.
//!
//! ```toml
//! preferred = "groq-llama-3.3-70b"
//! ```

use std::sync::Arc;

use super::traits::CompletionProvider;

/// Reorder a provider slice so the named provider is at index 0.
///
/// If no provider matches `preferred`, the slice is left unchanged.
pub(crate) fn promote_preferred<T: HasName>(providers: &mut [T], preferred: &str) {
    if let Some(idx) = providers.iter().position(|p| p.name() == preferred)
        && idx > 0
    {
        // Rotate the preferred provider to position 0, preserving
        // relative order of the others.
        providers[..=idx].rotate_right(1);
    }
}

/// Trait for types that have a provider name. Implemented for
/// `Arc<dyn CompletionProvider>` so `promote_preferred` can work generically.
pub(crate) trait HasName {
    fn name(&self) -> &str;
}

impl HasName for Arc<dyn CompletionProvider> {
    fn name(&self) -> &str {
        CompletionProvider::name(self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);
    impl HasName for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn names(providers: &[Named]) -> Vec<&str> {
        providers.iter().map(|p| p.name()).collect()
    }

    #[test]
    fn promote_moves_to_front() {
        let mut providers = [Named("a"), Named("b"), Named("c")];
        promote_preferred(&mut providers, "c");
        assert_eq!(names(&providers), ["c", "a", "b"]);
    }

    #[test]
    fn promote_preserves_order_of_others() {
        let mut providers = [Named("a"), Named("b"), Named("c"), Named("d")];
        promote_preferred(&mut providers, "c");
        assert_eq!(names(&providers), ["c", "a", "b", "d"]);
    }

    #[test]
    fn promote_noop_if_already_first() {
        let mut providers = [Named("a"), Named("b"), Named("c")];
        promote_preferred(&mut providers, "a");
        assert_eq!(names(&providers), ["a", "b", "c"]);
    }

    #[test]
    fn promote_noop_if_not_found() {
        let mut providers = [Named("a"), Named("b")];
        promote_preferred(&mut providers, "nonexistent");
        assert_eq!(names(&providers), ["a", "b"]);
    }
}
