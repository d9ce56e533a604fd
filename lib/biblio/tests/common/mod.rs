//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use biblio::middleware::{AlertPresenter, Completion, ErrorDialog, Navigator, TokenProvider};

/// One observed collaborator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The presenter showed a dialog and the user acknowledged it.
    Alert(ErrorDialog),
    /// The navigator changed the route.
    Navigate(String),
}

/// Records alert and navigation events in arrival order.
#[derive(Default)]
pub struct UiLog {
    events: Mutex<Vec<UiEvent>>,
}

impl UiLog {
    /// All recorded events, oldest first.
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().expect("lock").clone()
    }

    /// Only the acknowledged dialogs.
    pub fn alerts(&self) -> Vec<ErrorDialog> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::Alert(dialog) => Some(dialog),
                UiEvent::Navigate(_) => None,
            })
            .collect()
    }

    /// Only the visited routes.
    pub fn routes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::Navigate(route) => Some(route),
                UiEvent::Alert(_) => None,
            })
            .collect()
    }

    fn push(&self, event: UiEvent) {
        self.events.lock().expect("lock").push(event);
    }
}

/// Presenter double; acknowledgment resolves one tick after display.
pub struct RecordingPresenter(pub Arc<UiLog>);

impl AlertPresenter for RecordingPresenter {
    fn show_error(&self, dialog: ErrorDialog) -> Completion {
        let log = Arc::clone(&self.0);
        Box::pin(async move {
            tokio::task::yield_now().await;
            log.push(UiEvent::Alert(dialog));
        })
    }
}

/// Navigator double recording visited routes.
pub struct RecordingNavigator(pub Arc<UiLog>);

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) -> Completion {
        let log = Arc::clone(&self.0);
        let route = route.to_string();
        Box::pin(async move {
            log.push(UiEvent::Navigate(route));
        })
    }
}

/// Build a shared log plus presenter/navigator doubles feeding it.
pub fn recording_ui() -> (Arc<UiLog>, Arc<RecordingPresenter>, Arc<RecordingNavigator>) {
    let log = Arc::new(UiLog::default());
    let presenter = Arc::new(RecordingPresenter(Arc::clone(&log)));
    let navigator = Arc::new(RecordingNavigator(Arc::clone(&log)));
    (log, presenter, navigator)
}

/// Token source whose value can be swapped between calls.
pub struct RotatingToken(Mutex<String>);

impl RotatingToken {
    /// Create with an initial token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Mutex::new(token.into()))
    }

    /// Replace the current token.
    pub fn set(&self, token: impl Into<String>) {
        *self.0.lock().expect("lock") = token.into();
    }
}

impl TokenProvider for RotatingToken {
    fn access_token(&self) -> String {
        self.0.lock().expect("lock").clone()
    }
}
