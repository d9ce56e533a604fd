//! End-to-end tests for the books client over the standard interceptor chain.

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert2::let_assert;
use biblio::middleware::{ErrorDialog, LoadingState, TokenProvider};
use biblio::{Book, BookDraft, BooksClient};
use common::{RecordingNavigator, RecordingPresenter, RotatingToken, UiEvent, UiLog, recording_ui};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Standard chain with a zero delay so tests run at full speed.
fn wired_client(
    base_url: &str,
    token: &str,
) -> (BooksClient, LoadingState, Arc<UiLog>) {
    let loading = LoadingState::new();
    let (log, presenter, navigator) = recording_ui();
    let books = BooksClient::standard_with_delay(
        base_url,
        Arc::new(RotatingToken::new(token)) as Arc<dyn TokenProvider>,
        loading.clone(),
        Duration::ZERO,
        presenter,
        navigator,
    )
    .expect("client");
    (books, loading, log)
}

#[tokio::test]
async fn list_returns_books_through_the_chain() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .and(header("Authorization", "Bearer reader-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"id": 1, "title": "A", "author": "X"}])),
        )
        .mount(&mock_server)
        .await;

    let (books, loading, log) = wired_client(&mock_server.uri(), "reader-token");

    let all = books.list().await.expect("books");

    assert_eq!(
        all,
        vec![Book {
            id: 1,
            title: "A".to_string(),
            author: "X".to_string(),
        }]
    );
    assert!(!loading.is_loading());
    assert!(log.events().is_empty());
}

#[tokio::test]
async fn get_fetches_one_book() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books/5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 5, "title": "B", "author": "Y"})),
        )
        .mount(&mock_server)
        .await;

    let (books, _loading, _log) = wired_client(&mock_server.uri(), "reader-token");

    let book = books.get(5).await.expect("book");
    assert_eq!(book.id, 5);
    assert_eq!(book.title, "B");
}

#[tokio::test]
async fn create_sends_the_draft_as_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/books"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({"title": "B", "author": "Y"})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({"id": 9, "title": "B", "author": "Y"})),
        )
        .mount(&mock_server)
        .await;

    let (books, _loading, _log) = wired_client(&mock_server.uri(), "writer-token");

    let created = books
        .create(&BookDraft {
            title: "B".to_string(),
            author: "Y".to_string(),
        })
        .await
        .expect("created");

    assert_eq!(created.id, 9);
}

#[tokio::test]
async fn update_replaces_a_book() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/books/3"))
        .and(body_json(
            serde_json::json!({"id": 3, "title": "C", "author": "Z"}),
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 3, "title": "C", "author": "Z"})),
        )
        .mount(&mock_server)
        .await;

    let (books, _loading, _log) = wired_client(&mock_server.uri(), "writer-token");

    let book = Book {
        id: 3,
        title: "C".to_string(),
        author: "Z".to_string(),
    };
    let updated = books.update(&book).await.expect("updated");
    assert_eq!(updated, book);
}

#[tokio::test]
async fn delete_returns_the_removed_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/books/5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 5, "title": "B", "author": "Y"})),
        )
        .mount(&mock_server)
        .await;

    let (books, loading, _log) = wired_client(&mock_server.uri(), "writer-token");

    let removed = books.delete(5).await.expect("removed");
    assert_eq!(removed.id, 5);
    assert!(!loading.is_loading());
}

/// POST returning 401: the caller sees the failure, the dialog shows the
/// fixed message, and navigation to "login" happens exactly once, after
/// acknowledgment.
#[tokio::test]
async fn create_unauthorized_alerts_and_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let (books, loading, log) = wired_client(&mock_server.uri(), "expired-token");

    let result = books
        .create(&BookDraft {
            title: "B".to_string(),
            author: "Y".to_string(),
        })
        .await;

    let_assert!(Err(error) = result);
    assert!(error.is_unauthorized());

    assert_eq!(
        log.events(),
        vec![
            UiEvent::Alert(ErrorDialog {
                status: 401,
                status_text: "Unauthorized".to_string(),
                message: "You need to authenticate first".to_string(),
            }),
            UiEvent::Navigate("login".to_string()),
        ]
    );
    assert_eq!(log.routes(), vec!["login".to_string()]);
    assert!(!loading.is_loading());
}

/// DELETE against an unreachable server: connection failure, no 401 side
/// effects, loading deactivates.
#[tokio::test]
async fn delete_unreachable_server_keeps_ui_quiet() {
    let (books, loading, log) = wired_client("http://127.0.0.1:9", "any-token");

    let result = books.delete(5).await;

    let_assert!(Err(error) = result);
    assert!(error.is_connection() || error.is_timeout());
    assert!(log.alerts().is_empty());
    assert!(log.routes().is_empty());
    assert!(!loading.is_loading());
}

#[tokio::test]
async fn base_url_with_a_path_prefix_is_preserved() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let base = format!("{}/api/v1", mock_server.uri());
    let (books, _loading, _log) = wired_client(&base, "reader-token");

    let all = books.list().await.expect("books");
    assert!(all.is_empty());
}

/// The default constructor wires the chain with the stock delay; constructing
/// it must not require any network.
#[test]
fn standard_constructor_builds() {
    let loading = LoadingState::new();
    let log = Arc::new(UiLog::default());
    let books = BooksClient::standard(
        "https://api.example.com",
        Arc::new(RotatingToken::new("token")) as Arc<dyn TokenProvider>,
        loading,
        Arc::new(RecordingPresenter(Arc::clone(&log))),
        Arc::new(RecordingNavigator(log)),
    )
    .expect("client");

    assert_eq!(books.base_url().as_str(), "https://api.example.com/");
}
