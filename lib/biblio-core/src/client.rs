//! HTTP client trait.

use std::future::Future;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// This trait defines the interface for executing HTTP requests. The
/// `biblio` crate's `HyperClient` implements it over a real transport with
/// an interceptor chain; tests implement it with canned outcomes.
///
/// `Ok` carries a 2xx response; every other outcome (non-2xx status,
/// connection failure, timeout) arrives as an [`crate::Error`].
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Non-2xx HTTP status
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}
