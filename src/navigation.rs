//! Navigation targets and the sink that receives them.
//!
//! Views never build redirect paths by hand; they hand a [`Route`] to a
//! [`Navigator`] owned by whoever is driving the page.

use crate::models::{AnswerId, GroupId, NoteId};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Notes,
    NewNote,
    /// A note, optionally remembering the page that sent the user there.
    Note {
        id: NoteId,
        return_to: Option<String>,
    },
    EditNote(NoteId),
    Groups,
    Group(GroupId),
    Ask,
    Answer(AnswerId),
    Search,
    /// A previously recorded path, e.g. a `return_to` value.
    Path(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Notes => "/notes".to_string(),
            Route::NewNote => "/notes/new".to_string(),
            Route::Note { id, return_to: None } => format!("/notes/{}", id),
            Route::Note {
                id,
                return_to: Some(back),
            } => format!("/notes/{}?return_to={}", id, urlencoding::encode(back)),
            Route::EditNote(id) => format!("/notes/{}/edit", id),
            Route::Groups => "/groups".to_string(),
            Route::Group(id) => format!("/groups/{}", id),
            Route::Ask => "/ask".to_string(),
            Route::Answer(id) => format!("/answers/{}", id),
            Route::Search => "/search".to_string(),
            Route::Path(path) => path.clone(),
        }
    }

    /// Accept a user-supplied `return_to` only if it is a local path.
    /// Anything else (absolute URLs, protocol-relative `//host`) is dropped.
    pub fn from_return_to(raw: Option<&str>) -> Option<Route> {
        let raw = raw?.trim();
        if raw.starts_with('/') && !raw.starts_with("//") && !raw.contains('\\') {
            Some(Route::Path(raw.to_string()))
        } else {
            None
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Receives navigation requests raised by views and citation widgets.
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

impl<F: FnMut(Route)> Navigator for F {
    fn navigate(&mut self, route: Route) {
        self(route)
    }
}

/// Records the last requested route so an HTTP handler can turn it into a
/// redirect once the view logic has run.
#[derive(Debug, Default)]
pub struct RedirectNavigator {
    target: Option<Route>,
}

impl RedirectNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<&Route> {
        self.target.as_ref()
    }

    pub fn into_target(self) -> Option<Route> {
        self.target
    }
}

impl Navigator for RedirectNavigator {
    fn navigate(&mut self, route: Route) {
        tracing::debug!(target = %route, "navigate");
        self.target = Some(route);
    }
}
