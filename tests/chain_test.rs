//! Integration tests for the provider fallback chain.
//!
//! Providers are scripted in-process; time-dependent tests run on a paused
//! tokio clock so timeouts resolve instantly and deterministically.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use scholia::providers::{CompletionProvider, ProviderChain};
use scholia::types::{CompletionRequest, CompletionSource};
use scholia::{ManualClock, Result, ScholiaError};

// ============================================================================
// Scripted provider
// ============================================================================

enum Script {
    Reply(&'static str),
    Fail,
    Blank,
    Slow(Duration, &'static str),
}

struct Scripted {
    name: &'static str,
    script: Script,
    calls: AtomicUsize,
    completed: AtomicBool,
}

impl Scripted {
    fn new(name: &'static str, script: Script) -> Arc<Self> {
        Arc::new(Self {
            name,
            script,
            calls: AtomicUsize::new(0),
            completed: AtomicBool::new(false),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for Scripted {
    fn name(&self) -> &str {
        self.name
    }

    fn model(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Reply(text) => Ok((*text).to_string()),
            Script::Fail => Err(ScholiaError::Http("connection refused".into())),
            Script::Blank => Ok("  \n ".to_string()),
            Script::Slow(delay, text) => {
                tokio::time::sleep(*delay).await;
                self.completed.store(true, Ordering::SeqCst);
                Ok((*text).to_string())
            }
        }
    }
}

fn chain(providers: &[Arc<Scripted>]) -> ProviderChain {
    ProviderChain::with_providers(
        providers
            .iter()
            .map(|p| p.clone() as Arc<dyn CompletionProvider>)
            .collect(),
    )
}

fn request() -> CompletionRequest {
    CompletionRequest::new("system", "question")
}

const TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// Ordering
// ============================================================================

#[tokio::test]
async fn first_success_wins_and_later_providers_are_not_called() {
    let a = Scripted::new("a", Script::Fail);
    let b = Scripted::new("b", Script::Reply("from b"));
    let c = Scripted::new("c", Script::Reply("from c"));

    let completion = chain(&[a.clone(), b.clone(), c.clone()])
        .attempt("answer", &request(), TIMEOUT)
        .await
        .unwrap();

    assert_eq!(completion.content, "from b");
    assert_eq!(completion.provider, "b");
    assert_eq!((a.calls(), b.calls(), c.calls()), (1, 1, 0));
}

#[tokio::test]
async fn blank_content_falls_through() {
    let a = Scripted::new("a", Script::Blank);
    let b = Scripted::new("b", Script::Reply("real answer"));

    let completion = chain(&[a, b])
        .attempt("answer", &request(), TIMEOUT)
        .await
        .unwrap();
    assert_eq!(completion.content, "real answer");
}

#[tokio::test]
async fn each_provider_is_tried_once() {
    let a = Scripted::new("a", Script::Fail);
    let b = Scripted::new("b", Script::Fail);

    let _ = chain(&[a.clone(), b.clone()])
        .attempt("answer", &request(), TIMEOUT)
        .await;
    assert_eq!((a.calls(), b.calls()), (1, 1));
}

#[tokio::test]
async fn promote_moves_preferred_first() {
    let a = Scripted::new("a", Script::Reply("from a"));
    let b = Scripted::new("b", Script::Reply("from b"));
    let mut chain = chain(&[a.clone(), b.clone()]);
    chain.promote("b");

    let completion = chain.attempt("answer", &request(), TIMEOUT).await.unwrap();
    assert_eq!(completion.provider, "b");
    assert_eq!(a.calls(), 0);
}

// ============================================================================
// Exhaustion
// ============================================================================

#[tokio::test]
async fn all_failures_exhaust_the_chain() {
    let providers = [
        Scripted::new("a", Script::Fail),
        Scripted::new("b", Script::Blank),
        Scripted::new("c", Script::Fail),
    ];
    let err = chain(&providers)
        .attempt("answer", &request(), TIMEOUT)
        .await
        .unwrap_err();
    assert!(matches!(err, ScholiaError::ChainExhausted { attempts: 3 }));
}

#[tokio::test]
async fn empty_chain_has_no_provider() {
    let err = ProviderChain::new()
        .attempt("answer", &request(), TIMEOUT)
        .await
        .unwrap_err();
    assert!(matches!(err, ScholiaError::NoProvider));
}

#[tokio::test]
async fn attempt_or_fallback_serves_fallback_on_exhaustion() {
    let clock = ManualClock::new(42);
    let result = chain(&[Scripted::new("a", Script::Fail)])
        .attempt_or_fallback("notes", &request(), TIMEOUT, &clock, || {
            "canned".to_string()
        })
        .await;

    assert_eq!(result.content, "canned");
    assert_eq!(result.source, CompletionSource::Fallback);
    assert_eq!(result.produced_at_ms, 42);
}

#[tokio::test]
async fn attempt_or_fallback_does_not_build_fallback_on_success() {
    let clock = ManualClock::new(7);
    let result = chain(&[Scripted::new("a", Script::Reply("model text"))])
        .attempt_or_fallback("notes", &request(), TIMEOUT, &clock, || {
            panic!("fallback must not be built")
        })
        .await;

    assert_eq!(result.content, "model text");
    assert_eq!(result.source, CompletionSource::Provider("a".into()));
}

// ============================================================================
// Timeouts
// ============================================================================

#[tokio::test(start_paused = true)]
async fn slow_provider_times_out_and_chain_moves_on() {
    let slow = Scripted::new("slow", Script::Slow(Duration::from_secs(30), "late"));
    let fast = Scripted::new("fast", Script::Reply("on time"));

    let completion = chain(&[slow.clone(), fast])
        .attempt("answer", &request(), Duration::from_secs(20))
        .await
        .unwrap();
    assert_eq!(completion.content, "on time");
    assert!(!slow.completed.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn response_within_timeout_is_used() {
    let slow = Scripted::new("slow", Script::Slow(Duration::from_millis(10), "in time"));

    let completion = chain(&[slow])
        .attempt("answer", &request(), Duration::from_millis(50))
        .await
        .unwrap();
    assert_eq!(completion.content, "in time");
}

/// A fails, B answers after 200ms against a 50ms timeout, C answers.
/// Only C's content may come back, and B's late reply never lands.
#[tokio::test(start_paused = true)]
async fn late_response_is_never_used() {
    let a = Scripted::new("a", Script::Fail);
    let b = Scripted::new("b", Script::Slow(Duration::from_millis(200), "late reply from B"));
    let c = Scripted::new(
        "c",
        Script::Reply("The mitochondria is the powerhouse of the cell."),
    );

    let completion = chain(&[a, b.clone(), c])
        .attempt("answer", &request(), Duration::from_millis(50))
        .await
        .unwrap();
    assert_eq!(
        completion.content,
        "The mitochondria is the powerhouse of the cell."
    );

    // B's future was dropped at the timeout; it never finishes.
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(b.calls(), 1);
    assert!(!b.completed.load(Ordering::SeqCst));
}
