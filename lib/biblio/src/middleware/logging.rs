//! Request/outcome logging middleware.
//!
//! Logs HTTP requests and their outcomes using the `tracing` crate.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, Request, Response, Result};

/// Layer that adds request/outcome logging.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    _private: (),
}

impl LoggingLayer {
    /// Create a new logging layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging { inner }
    }
}

/// Service that logs requests and outcomes.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
}

impl<S> Service<Request<Bytes>> for Logging<S>
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
        let method = request.method();
        let url = request.url().to_string();
        let span = span!(Level::INFO, "http_request", %method, %url);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();
                debug!(header_count = request.headers().len(), "sending request");

                let outcome = inner.call(request).await;

                // Saturating conversion to u64 (truncates after ~584 million years)
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &outcome {
                    Ok(response) => {
                        info!(status = response.status(), elapsed_ms, "request completed");
                    }
                    Err(error) => {
                        warn!(error = %error, status = ?error.status(), elapsed_ms, "request failed");
                    }
                }

                outcome
            }
            .instrument(span),
        )
    }
}
