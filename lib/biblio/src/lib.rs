//! Books API data-access layer with an HTTP interceptor chain.
//!
//! The crate has two halves:
//!
//! - [`HyperClient`]: an HTTP client over hyper-util with connection pooling,
//!   TLS, and Tower middleware composition.
//! - [`BooksClient`]: a thin façade over the books resource (list, get,
//!   create, update, delete).
//!
//! Cross-cutting concerns live in the [`middleware`] chain, not in the
//! resource client: bearer-token injection, the shared loading signal with
//! its artificial delay, and translation of `401 Unauthorized` failures into
//! an alert dialog followed by a redirect to the login route.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use biblio::BooksClient;
//! use biblio::middleware::LoadingState;
//!
//! let loading = LoadingState::new();
//! let books = BooksClient::standard(
//!     "https://api.example.com",
//!     Arc::new(session),   // TokenProvider
//!     loading.clone(),
//!     Arc::new(dialogs),   // AlertPresenter
//!     Arc::new(router),    // Navigator
//! )?;
//!
//! let all = books.list().await?;
//! ```

mod books;
mod client;
mod config;
mod connector;
pub mod middleware;

// Re-export client types
pub use books::{Book, BookDraft, BooksClient};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use biblio_core::{
    Error, HttpClient, Method, Request, RequestBuilder, Response, Result, from_json, to_json,
};

// Re-export url for request building
pub use url;
