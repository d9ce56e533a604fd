//! Tower middleware layers for the biblio HTTP client.
//!
//! Every outbound request and its outcome pass through each configured layer
//! exactly once per call. Layers are independent: none knows which others are
//! present, and each one's cleanup runs regardless of what the layers closer
//! to the caller do with the outcome.
//!
//! # Available Layers
//!
//! - [`BearerAuthLayer`] - Adds `Authorization: Bearer <token>` from a
//!   [`TokenProvider`], read at interception time
//! - [`LoadingLayer`] - Tracks in-flight calls on a shared [`LoadingState`]
//!   and applies the artificial outcome delay
//! - [`ErrorAlertLayer`] - Shows a dialog for `401 Unauthorized` failures,
//!   then redirects to the login route; always re-raises the failure
//! - [`LoggingLayer`] - Logs requests/outcomes using `tracing`
//!
//! # Ordering
//!
//! `HyperClientBuilder` applies layers first-added-outermost: the first layer
//! added sees the request first and the outcome last. The standard chain is
//! bearer auth, then loading, then error alerting, so the loading stop fires
//! only after the alert/redirect sequence has finished.
//!
//! ```ignore
//! use biblio::HyperClient;
//!
//! let client = HyperClient::builder()
//!     .with_bearer_auth(tokens)
//!     .with_loading(loading)
//!     .with_error_alerts(dialogs, router)
//!     .build();
//! ```

mod bearer_auth;
mod error_alert;
mod loading;
mod logging;

pub use bearer_auth::{BearerAuth, BearerAuthLayer, TokenProvider};
pub use error_alert::{
    AlertPresenter, Completion, ErrorAlert, ErrorAlertLayer, ErrorDialog, Navigator,
};
pub use loading::{DEFAULT_LOADING_DELAY, Loading, LoadingGuard, LoadingLayer, LoadingState};
pub use logging::{Logging, LoggingLayer};

// Re-export the tower layer trait for custom middleware
pub use tower::Layer;
