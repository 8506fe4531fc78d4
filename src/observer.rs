//! Diagnostic observers for injector resolution events.
//!
//! Observers see every resolution an injector performs, every delegation to a
//! parent, and every ignored duplicate binding. Observers registered on an
//! injector are inherited by the children it spawns.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::token::Token;

/// Observer trait for injector events.
///
/// Calls are made synchronously on the resolving thread. Keep implementations
/// cheap.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use ferrous_injector::{Injector, InjectorObserver, Token};
///
/// struct Printer;
///
/// impl InjectorObserver for Printer {
///     fn resolving(&self, token: &Token) {
///         println!("resolving {}", token);
///     }
///
///     fn resolved(&self, token: &Token, duration: Duration) {
///         println!("resolved {} in {:?}", token, duration);
///     }
/// }
///
/// let injector = Injector::builder().root().observer(Arc::new(Printer)).build();
/// injector.bind_constant("NUM", 6).unwrap();
/// injector.resolve_one(&"NUM".into()).unwrap();
/// ```
pub trait InjectorObserver: Send + Sync {
    /// A locally bound provider is about to run.
    fn resolving(&self, token: &Token);

    /// The provider for `token` returned successfully.
    fn resolved(&self, token: &Token, duration: Duration);

    /// `token` was not bound locally and is being looked up in the parent at
    /// `depth` (1 for the immediate parent).
    fn delegated(&self, _token: &Token, _depth: usize) {}

    /// `bind` ignored a second provider for `token`.
    fn duplicate_binding(&self, _token: &Token) {}

    /// Resolution of `token` failed on this injector.
    fn resolution_failed(&self, _token: &Token, _error: &DiError) {}
}

/// Container for registered observers.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn InjectorObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn InjectorObserver>) {
        self.observers.push(observer);
    }

    pub(crate) fn extend(&mut self, other: Observers) {
        self.observers.extend(other.observers);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    #[inline]
    pub(crate) fn resolving(&self, token: &Token) {
        for observer in &self.observers {
            observer.resolving(token);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, token: &Token, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(token, duration);
        }
    }

    #[inline]
    pub(crate) fn delegated(&self, token: &Token, depth: usize) {
        for observer in &self.observers {
            observer.delegated(token, depth);
        }
    }

    #[inline]
    pub(crate) fn duplicate_binding(&self, token: &Token) {
        for observer in &self.observers {
            observer.duplicate_binding(token);
        }
    }

    #[inline]
    pub(crate) fn resolution_failed(&self, token: &Token, error: &DiError) {
        for observer in &self.observers {
            observer.resolution_failed(token, error);
        }
    }
}

/// Built-in observer that forwards events to `tracing`.
///
/// Resolutions are emitted at `DEBUG`, delegations at `TRACE`, duplicates and
/// failures at `WARN`. Every event carries the observer's `scope` field so
/// several injectors can be told apart in one log stream.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use ferrous_injector::{Injector, LoggingObserver};
///
/// let injector = Injector::builder()
///     .root()
///     .observer(Arc::new(LoggingObserver::with_scope("request")))
///     .build();
/// ```
pub struct LoggingObserver {
    scope: String,
}

impl LoggingObserver {
    pub fn new() -> Self {
        Self {
            scope: "injector".to_string(),
        }
    }

    pub fn with_scope(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl InjectorObserver for LoggingObserver {
    fn resolving(&self, token: &Token) {
        tracing::debug!(scope = %self.scope, token = %token, "resolving");
    }

    fn resolved(&self, token: &Token, duration: Duration) {
        tracing::debug!(scope = %self.scope, token = %token, ?duration, "resolved");
    }

    fn delegated(&self, token: &Token, depth: usize) {
        tracing::trace!(scope = %self.scope, token = %token, depth, "delegating to parent");
    }

    fn duplicate_binding(&self, token: &Token) {
        tracing::warn!(scope = %self.scope, token = %token, "duplicate binding ignored");
    }

    fn resolution_failed(&self, token: &Token, error: &DiError) {
        tracing::warn!(scope = %self.scope, token = %token, %error, "resolution failed");
    }
}

/// Observer that keeps counters, useful for health checks and tests.
///
/// ```
/// use std::sync::Arc;
/// use ferrous_injector::{Injector, MetricsObserver};
///
/// let metrics = Arc::new(MetricsObserver::new());
/// let root = Injector::builder().root().observer(metrics.clone()).build();
/// root.bind_constant("NUM", 6).unwrap();
///
/// let child = root.spawn();
/// child.resolve_one(&"NUM".into()).unwrap();
/// assert_eq!(metrics.resolution_count(), 1);
/// assert_eq!(metrics.delegation_count(), 1);
/// ```
#[derive(Default)]
pub struct MetricsObserver {
    resolution_count: AtomicU64,
    total_resolution_time: AtomicU64,
    delegation_count: AtomicU64,
    duplicate_count: AtomicU64,
    failure_count: AtomicU64,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution_count(&self) -> u64 {
        self.resolution_count.load(Ordering::Relaxed)
    }

    pub fn delegation_count(&self) -> u64 {
        self.delegation_count.load(Ordering::Relaxed)
    }

    pub fn duplicate_count(&self) -> u64 {
        self.duplicate_count.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub fn total_resolution_time(&self) -> Duration {
        Duration::from_nanos(self.total_resolution_time.load(Ordering::Relaxed))
    }

    pub fn average_resolution_time(&self) -> Option<Duration> {
        let count = self.resolution_count();
        if count == 0 {
            return None;
        }
        let total_ns = self.total_resolution_time.load(Ordering::Relaxed);
        Some(Duration::from_nanos(total_ns / count))
    }
}

impl InjectorObserver for MetricsObserver {
    fn resolving(&self, _token: &Token) {}

    fn resolved(&self, _token: &Token, duration: Duration) {
        self.resolution_count.fetch_add(1, Ordering::Relaxed);
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        // saturates rather than wrapping
        let _ = self
            .total_resolution_time
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |total| {
                Some(total.saturating_add(nanos))
            });
    }

    fn delegated(&self, _token: &Token, _depth: usize) {
        self.delegation_count.fetch_add(1, Ordering::Relaxed);
    }

    fn duplicate_binding(&self, _token: &Token) {
        self.duplicate_count.fetch_add(1, Ordering::Relaxed);
    }

    fn resolution_failed(&self, _token: &Token, _error: &DiError) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }
}
