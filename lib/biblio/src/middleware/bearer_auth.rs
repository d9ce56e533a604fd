//! Bearer token authentication middleware.
//!
//! Adds an `Authorization: Bearer <token>` header to every outgoing request.
//! The token comes from a [`TokenProvider`] and is read at the moment the
//! request is intercepted, so a rotated token is picked up without rebuilding
//! the client.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use tower::{Layer, Service};

use crate::{Error, Request, Response, Result};

/// Source of the current access token.
///
/// Implementations typically read from session storage owned by the
/// surrounding application. A plain `String` works as a fixed token.
pub trait TokenProvider: Send + Sync {
    /// The token to attach to the next request.
    fn access_token(&self) -> String;
}

impl TokenProvider for String {
    fn access_token(&self) -> String {
        self.clone()
    }
}

/// Layer that adds bearer token authentication to requests.
///
/// # Example
///
/// ```ignore
/// use biblio::middleware::BearerAuthLayer;
///
/// let layer = BearerAuthLayer::new(Arc::new(session));
/// let client = HyperClient::builder().layer(layer).build();
/// ```
#[derive(Clone)]
pub struct BearerAuthLayer {
    provider: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for BearerAuthLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuthLayer").finish_non_exhaustive()
    }
}

impl BearerAuthLayer {
    /// Create a bearer auth layer backed by the given token provider.
    #[must_use]
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self { provider }
    }

    /// Create a bearer auth layer with a fixed token.
    #[must_use]
    pub fn fixed(token: impl Into<String>) -> Self {
        Self::new(Arc::new(token.into()))
    }
}

impl<S> Layer<S> for BearerAuthLayer {
    type Service = BearerAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BearerAuth {
            inner,
            provider: Arc::clone(&self.provider),
        }
    }
}

/// Service that adds bearer token authentication to requests.
#[derive(Clone)]
pub struct BearerAuth<S> {
    inner: S,
    provider: Arc<dyn TokenProvider>,
}

impl<S: std::fmt::Debug> std::fmt::Debug for BearerAuth<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<S> Service<Request<Bytes>> for BearerAuth<S>
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

    fn call(&mut self, mut request: Request<Bytes>) -> Self::Future {
        // Token is looked up per call, never cached on the service.
        request.headers_mut().insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.provider.access_token()),
        );

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(request).await })
    }
}
