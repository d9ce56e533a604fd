//! Core types and traits for the biblio books client.
//!
//! This crate provides the foundational types used by biblio:
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] - HTTP response type
//! - [`Error`] and [`Result`] - Error handling
//! - [`HttpClient`] - Core client trait for HTTP execution
//!
//! Everything here is transport-free: the actual network client and the
//! interceptor chain live in the `biblio` crate.

mod body;
mod client;
mod error;
mod method;
mod request;
mod response;

pub use body::{from_json, to_json};
pub use client::HttpClient;
pub use error::{Error, Result};
pub use method::Method;
pub use request::{Request, RequestBuilder};
pub use response::Response;
