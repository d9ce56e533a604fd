//! Books resource client.
//!
//! [`BooksClient`] is a thin façade over an [`HttpClient`]: each operation
//! builds one request and decodes one response. Cross-cutting concerns (the
//! auth header, the loading signal and its delay, unauthorized alerting)
//! belong to the interceptor chain configured on the underlying client, so
//! none of them is duplicated here.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::middleware::{
    AlertPresenter, DEFAULT_LOADING_DELAY, LoadingState, Navigator, TokenProvider,
};
use crate::{Error, HttpClient, HyperClient, Method, Request, RequestBuilder, Result};

/// A book record as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Server-assigned identifier.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
}

/// Payload for creating a book; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDraft {
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
}

/// Client for the books resource.
///
/// Generic over the HTTP client so tests can substitute a canned
/// implementation; production code uses [`HyperClient`] via
/// [`BooksClient::standard`].
#[derive(Debug, Clone)]
pub struct BooksClient<C = HyperClient> {
    client: C,
    base_url: Url,
}

impl<C: HttpClient> BooksClient<C> {
    /// Create a books client over the given HTTP client and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(client: C, base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url.as_ref())?,
        })
    }

    /// Create a books client with a pre-parsed base URL.
    #[must_use]
    pub fn with_url(client: C, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// The API base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch all books.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or deserialization fails.
    pub async fn list(&self) -> Result<Vec<Book>> {
        let request = self.request(Method::Get, &["books"])?.build();
        self.client.execute(request).await?.json()
    }

    /// Fetch a single book by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or deserialization fails.
    pub async fn get(&self, id: u64) -> Result<Book> {
        let request = self.request(Method::Get, &["books", &id.to_string()])?.build();
        self.client.execute(request).await?.json()
    }

    /// Create a book; returns the stored record with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the request, or deserialization
    /// fails.
    pub async fn create(&self, draft: &BookDraft) -> Result<Book> {
        let request = self.request(Method::Post, &["books"])?.json(draft)?.build();
        self.client.execute(request).await?.json()
    }

    /// Replace a book; returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the request, or deserialization
    /// fails.
    pub async fn update(&self, book: &Book) -> Result<Book> {
        let request = self
            .request(Method::Put, &["books", &book.id.to_string()])?
            .json(book)?
            .build();
        self.client.execute(request).await?.json()
    }

    /// Delete a book by id; the server echoes the removed record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or deserialization fails.
    pub async fn delete(&self, id: u64) -> Result<Book> {
        let request = self
            .request(Method::Delete, &["books", &id.to_string()])?
            .build();
        self.client.execute(request).await?.json()
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder<Bytes>> {
        Ok(Request::builder(method, self.endpoint(segments)?)
            .header("Accept", "application/json"))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::invalid_request("base URL cannot be an API root"))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }
}

impl BooksClient<HyperClient> {
    /// Build a books client over [`HyperClient`] with the standard
    /// interceptor chain, outermost first: bearer auth, loading signal,
    /// unauthorized alerting.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn standard(
        base_url: impl AsRef<str>,
        tokens: Arc<dyn TokenProvider>,
        loading: LoadingState,
        alerts: Arc<dyn AlertPresenter>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        Self::standard_with_delay(
            base_url,
            tokens,
            loading,
            DEFAULT_LOADING_DELAY,
            alerts,
            navigator,
        )
    }

    /// Same as [`BooksClient::standard`] with a custom artificial delay.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn standard_with_delay(
        base_url: impl AsRef<str>,
        tokens: Arc<dyn TokenProvider>,
        loading: LoadingState,
        delay: Duration,
        alerts: Arc<dyn AlertPresenter>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let client = HyperClient::builder()
            .with_bearer_auth(tokens)
            .with_loading_delay(loading, delay)
            .with_error_alerts(alerts, navigator)
            .build();
        Self::new(client, base_url)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use assert2::let_assert;

    use super::*;
    use crate::Response;

    /// Canned HTTP client that records requests and replays one response.
    struct CannedClient {
        status: u16,
        body: &'static str,
        captured: Mutex<Vec<Request<Bytes>>>,
    }

    impl CannedClient {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                captured: Mutex::new(Vec::new()),
            }
        }

        fn last_request(&self) -> Request<Bytes> {
            self.captured
                .lock()
                .expect("lock")
                .last()
                .cloned()
                .expect("a captured request")
        }
    }

    impl HttpClient for &CannedClient {
        async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
            self.captured.lock().expect("lock").push(request);
            Ok(Response::new(
                self.status,
                HashMap::new(),
                Bytes::from_static(self.body.as_bytes()),
            ))
        }
    }

    #[tokio::test]
    async fn list_builds_get_books() {
        let canned = CannedClient::new(200, r#"[{"id":1,"title":"A","author":"X"}]"#);
        let books = BooksClient::new(&canned, "https://api.example.com").expect("client");

        let all = books.list().await.expect("books");

        assert_eq!(
            all,
            vec![Book {
                id: 1,
                title: "A".to_string(),
                author: "X".to_string(),
            }]
        );

        let request = canned.last_request();
        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url().as_str(), "https://api.example.com/books");
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert!(request.body().is_none());
    }

    #[tokio::test]
    async fn get_builds_book_path() {
        let canned = CannedClient::new(200, r#"{"id":5,"title":"B","author":"Y"}"#);
        let books = BooksClient::new(&canned, "https://api.example.com").expect("client");

        let book = books.get(5).await.expect("book");
        assert_eq!(book.id, 5);

        let request = canned.last_request();
        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url().as_str(), "https://api.example.com/books/5");
    }

    #[tokio::test]
    async fn create_posts_json_draft() {
        let canned = CannedClient::new(201, r#"{"id":9,"title":"B","author":"Y"}"#);
        let books = BooksClient::new(&canned, "https://api.example.com").expect("client");

        let created = books
            .create(&BookDraft {
                title: "B".to_string(),
                author: "Y".to_string(),
            })
            .await
            .expect("created");
        assert_eq!(created.id, 9);

        let request = canned.last_request();
        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        let body = request.body().cloned().expect("body");
        assert_eq!(body.as_ref(), br#"{"title":"B","author":"Y"}"#);
    }

    #[tokio::test]
    async fn update_puts_to_book_path() {
        let canned = CannedClient::new(200, r#"{"id":3,"title":"C","author":"Z"}"#);
        let books = BooksClient::new(&canned, "https://api.example.com").expect("client");

        let book = Book {
            id: 3,
            title: "C".to_string(),
            author: "Z".to_string(),
        };
        let updated = books.update(&book).await.expect("updated");
        assert_eq!(updated, book);

        let request = canned.last_request();
        assert_eq!(request.method(), Method::Put);
        assert_eq!(request.url().as_str(), "https://api.example.com/books/3");
    }

    #[tokio::test]
    async fn delete_targets_book_path() {
        let canned = CannedClient::new(200, r#"{"id":5,"title":"B","author":"Y"}"#);
        let books = BooksClient::new(&canned, "https://api.example.com").expect("client");

        let removed = books.delete(5).await.expect("removed");
        assert_eq!(removed.id, 5);

        let request = canned.last_request();
        assert_eq!(request.method(), Method::Delete);
        assert_eq!(request.url().as_str(), "https://api.example.com/books/5");
        assert!(request.body().is_none());
    }

    #[tokio::test]
    async fn base_url_path_is_preserved() {
        let canned = CannedClient::new(200, "[]");
        let books = BooksClient::new(&canned, "https://api.example.com/api/v1/").expect("client");

        let all = books.list().await.expect("books");
        assert!(all.is_empty());

        let request = canned.last_request();
        assert_eq!(
            request.url().as_str(),
            "https://api.example.com/api/v1/books"
        );
    }

    #[tokio::test]
    async fn decode_failure_names_the_field() {
        let canned = CannedClient::new(200, r#"[{"id":1,"title":"A"}]"#);
        let books = BooksClient::new(&canned, "https://api.example.com").expect("client");

        let result = books.list().await;

        let_assert!(Err(error) = result);
        let msg = error.to_string();
        assert!(msg.contains("author"), "expected missing field in: {msg}");
    }

    #[test]
    fn rejects_invalid_base_url() {
        let canned = CannedClient::new(200, "[]");
        let result = BooksClient::new(&canned, "not a url");
        let_assert!(Err(Error::InvalidUrl(_)) = result);
    }
}
