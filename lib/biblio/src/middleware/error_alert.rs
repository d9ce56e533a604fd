//! Authorization failure alerting middleware.
//!
//! Watches outcomes for `401 Unauthorized` failures, shows the user an error
//! dialog, and sends them to the login route once the dialog is acknowledged.
//! The failure itself is always re-raised to the caller unchanged; nothing is
//! ever swallowed or turned into a success.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use tower::{Layer, Service};

use crate::{Error, Request, Response, Result};

/// Message shown for unauthorized failures.
const UNAUTHORIZED_MESSAGE: &str = "You need to authenticate first";

/// Route used when no custom login route is configured.
const DEFAULT_LOGIN_ROUTE: &str = "login";

/// Future resolving once a collaborator has finished its side effect.
pub type Completion = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Description of a failed call, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDialog {
    /// HTTP status code of the failure.
    pub status: u16,
    /// Status text reported by the server.
    pub status_text: String,
    /// Human-readable explanation.
    pub message: String,
}

/// Modal error display.
pub trait AlertPresenter: Send + Sync {
    /// Show the dialog; the returned future resolves when the user has
    /// acknowledged it.
    fn show_error(&self, dialog: ErrorDialog) -> Completion;
}

/// Client-side router.
pub trait Navigator: Send + Sync {
    /// Change the current route; the returned future resolves when the
    /// route change has completed.
    fn navigate(&self, route: &str) -> Completion;
}

/// Layer that surfaces 401 failures as an alert followed by a redirect.
///
/// # Example
///
/// ```ignore
/// use biblio::middleware::ErrorAlertLayer;
///
/// let layer = ErrorAlertLayer::new(Arc::new(dialogs), Arc::new(router))
///     .with_login_route("sign-in");
/// ```
#[derive(Clone)]
pub struct ErrorAlertLayer {
    presenter: Arc<dyn AlertPresenter>,
    navigator: Arc<dyn Navigator>,
    login_route: Arc<str>,
}

impl std::fmt::Debug for ErrorAlertLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorAlertLayer")
            .field("login_route", &self.login_route)
            .finish_non_exhaustive()
    }
}

impl ErrorAlertLayer {
    /// Create an error alerting layer with the default login route.
    #[must_use]
    pub fn new(presenter: Arc<dyn AlertPresenter>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            presenter,
            navigator,
            login_route: Arc::from(DEFAULT_LOGIN_ROUTE),
        }
    }

    /// Set the route navigated to after an acknowledged 401 dialog.
    #[must_use]
    pub fn with_login_route(mut self, route: impl AsRef<str>) -> Self {
        self.login_route = Arc::from(route.as_ref());
        self
    }
}

impl<S> Layer<S> for ErrorAlertLayer {
    type Service = ErrorAlert<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorAlert {
            inner,
            presenter: Arc::clone(&self.presenter),
            navigator: Arc::clone(&self.navigator),
            login_route: Arc::clone(&self.login_route),
        }
    }
}

/// Service that alerts on 401 failures and re-raises them.
#[derive(Clone)]
pub struct ErrorAlert<S> {
    inner: S,
    presenter: Arc<dyn AlertPresenter>,
    navigator: Arc<dyn Navigator>,
    login_route: Arc<str>,
}

fn unauthorized_dialog(error: &Error) -> ErrorDialog {
    ErrorDialog {
        status: error.status().unwrap_or(401),
        status_text: error.status_text().unwrap_or_default().to_string(),
        message: UNAUTHORIZED_MESSAGE.to_string(),
    }
}

impl<S> Service<Request<Bytes>> for ErrorAlert<S>
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
        let presenter = Arc::clone(&self.presenter);
        let navigator = Arc::clone(&self.navigator);
        let login_route = Arc::clone(&self.login_route);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let outcome = inner.call(request).await;

            if let Err(error) = &outcome
                && error.is_unauthorized()
            {
                // Redirect only once the user has seen and closed the dialog
                presenter.show_error(unauthorized_dialog(error)).await;
                navigator.navigate(&login_route).await;
            }

            outcome
        })
    }
}
