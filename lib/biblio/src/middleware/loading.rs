//! Loading indicator middleware.
//!
//! Tracks in-flight requests on a shared [`LoadingState`] counter and holds
//! each outcome back by a configurable artificial delay before handing it to
//! the caller. The delay is a UX throttle, not a timeout; it never changes
//! the outcome.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use tower::{Layer, Service};

use crate::{Error, Request, Response, Result};

/// Delay applied to every outcome before it reaches the caller.
///
/// Override with [`LoadingLayer::with_delay`].
pub const DEFAULT_LOADING_DELAY: Duration = Duration::from_secs(5);

/// Shared in-flight request counter.
///
/// Clones share one counter, so several clients (or several concurrent calls
/// on one client) drive a single busy indicator: visible while
/// [`LoadingState::is_loading`] is `true`. Increments and decrements are
/// paired through the guard returned by [`LoadingState::begin`], which
/// releases on every exit path; the counter cannot go negative.
#[derive(Debug, Clone, Default)]
pub struct LoadingState {
    active: Arc<AtomicUsize>,
}

impl LoadingState {
    /// Create a counter with no in-flight requests.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a request as started; the guard marks it finished on drop.
    #[must_use]
    pub fn begin(&self) -> LoadingGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        LoadingGuard {
            state: self.clone(),
        }
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// `true` while at least one request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.active() > 0
    }

    fn finish(&self) {
        // checked_sub: the counter must never wrap below zero
        let _ = self
            .active
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }
}

/// Releases one in-flight slot when dropped.
#[derive(Debug)]
pub struct LoadingGuard {
    state: LoadingState,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state.finish();
    }
}

/// Layer that drives a [`LoadingState`] and applies the artificial delay.
///
/// # Example
///
/// ```ignore
/// use biblio::middleware::{LoadingLayer, LoadingState};
///
/// let loading = LoadingState::new();
/// let client = HyperClient::builder()
///     .layer(LoadingLayer::new(loading.clone()))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct LoadingLayer {
    state: LoadingState,
    delay: Duration,
}

impl LoadingLayer {
    /// Create a loading layer with the default delay.
    #[must_use]
    pub fn new(state: LoadingState) -> Self {
        Self {
            state,
            delay: DEFAULT_LOADING_DELAY,
        }
    }

    /// Set the artificial delay applied to each outcome.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl<S> Layer<S> for LoadingLayer {
    type Service = Loading<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Loading {
            inner,
            state: self.state.clone(),
            delay: self.delay,
        }
    }
}

/// Service that tracks in-flight requests and delays outcomes.
#[derive(Debug, Clone)]
pub struct Loading<S> {
    inner: S,
    state: LoadingState,
    delay: Duration,
}

impl<S> Service<Request<Bytes>> for Loading<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        // Counter moves as the call enters, not at first poll.
        let guard = self.state.begin();
        let delay = self.delay;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // Held across every exit path, including the future being dropped
            let _guard = guard;

            let outcome = inner.call(request).await;

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            outcome
        })
    }
}
