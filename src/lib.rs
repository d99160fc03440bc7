//! Notes client library - re-exports for testing and external use.
//!
//! A server-rendered browser client for a remote notes API. This module
//! provides public access to all the application's modules for testing
//! purposes and potential library use.

use axum_extra::extract::CookieJar;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub mod api;
pub mod citations;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod navigation;
pub mod presentation;
pub mod selection;
pub mod session;
pub mod templates;

use api::ApiClient;
use config::Config;
use error::ClientError;
use models::{Group, Note};
use selection::{ListItem, SelectionController};
use session::{token_expired, MemorySession, SESSION_TTL_HOURS};

// ============================================================================
// View State
// ============================================================================

/// One list view's controller, shared by the requests that act on it.
pub type SharedView<T> = Arc<tokio::sync::Mutex<SelectionController<T>>>;

/// Per-session list views. Each logged-in session gets its own controller
/// per list, so selections never leak between users or tabs of different
/// accounts.
///
/// Entries are swept on every `open`: views whose token has expired, or that
/// have sat idle longer than the idle limit, are dropped.
pub struct ViewRegistry<T: ListItem> {
    views: Mutex<HashMap<String, RegisteredView<T>>>,
    idle_limit: Duration,
}

struct RegisteredView<T: ListItem> {
    view: SharedView<T>,
    last_used: Instant,
}

impl<T: ListItem> ViewRegistry<T> {
    pub fn new() -> Self {
        Self::with_idle_limit(Duration::from_secs(SESSION_TTL_HOURS as u64 * 3600))
    }

    pub fn with_idle_limit(idle_limit: Duration) -> Self {
        Self {
            views: Mutex::new(HashMap::new()),
            idle_limit,
        }
    }

    /// The session's view, created empty on first use.
    pub fn open(&self, session: &str) -> SharedView<T> {
        let mut views = self.views.lock().unwrap_or_else(|e| e.into_inner());

        let before = views.len();
        views.retain(|token, entry| !token_expired(token) && entry.last_used.elapsed() < self.idle_limit);
        let evicted = before - views.len();
        if evicted > 0 {
            tracing::debug!(evicted, "dropped stale list views");
        }

        let entry = views.entry(session.to_string()).or_insert_with(|| RegisteredView {
            view: Arc::new(tokio::sync::Mutex::new(SelectionController::new(Vec::new()))),
            last_used: Instant::now(),
        });
        entry.last_used = Instant::now();
        entry.view.clone()
    }

    pub fn get(&self, session: &str) -> Option<SharedView<T>> {
        let mut views = self.views.lock().unwrap_or_else(|e| e.into_inner());
        let entry = views.get_mut(session)?;
        entry.last_used = Instant::now();
        Some(entry.view.clone())
    }

    pub fn discard(&self, session: &str) {
        self.views.lock().unwrap_or_else(|e| e.into_inner()).remove(session);
    }

    pub fn len(&self) -> usize {
        self.views.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ListItem> Default for ViewRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
    pub note_views: ViewRegistry<Note>,
    pub group_views: ViewRegistry<Group>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let http = ApiClient::build_http(&config)?;
        Ok(Self {
            config: Arc::new(config),
            http,
            note_views: ViewRegistry::new(),
            group_views: ViewRegistry::new(),
        })
    }

    /// API client acting for the session in this request's cookies.
    pub fn client(&self, jar: &CookieJar) -> ApiClient {
        ApiClient::new(
            self.http.clone(),
            self.config.clone(),
            Arc::new(MemorySession::from_cookies(jar)),
        )
    }

    /// API client with no session, for login and registration.
    pub fn anonymous_client(&self) -> ApiClient {
        ApiClient::new(self.http.clone(), self.config.clone(), Arc::new(MemorySession::new()))
    }
}

// Re-export commonly used types
pub use citations::{parse_citations, reassemble, Segment};
pub use error::{ConfigError, SelectionError};
pub use models::{Answer, Reference, ReferenceMap};
pub use navigation::{Navigator, RedirectNavigator, Route};
pub use presentation::{inline_nodes, paragraph_blocks, Activation, Block, CitationWidget, Node};
pub use selection::{BulkDeleteOutcome, RemoteCollection};
pub use session::{SessionProvider, SESSION_COOKIE};
