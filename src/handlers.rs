//! HTTP route handlers for the web application.
//!
//! Every page is rendered server-side from data fetched through [`crate::api::ApiClient`].
//! Mutations are POST forms that redirect back to a GET page. A 401 from the
//! API anywhere clears the session cookies and sends the user to `/login`.

use crate::error::{ClientError, SelectionError};
use crate::models::{AnswerId, GroupId, NoteDraft, NoteId, SearchRequest};
use crate::navigation::{Navigator, RedirectNavigator, Route};
use crate::presentation::{citations, inline_nodes, Activation};
use crate::selection::BulkDeleteOutcome;
use crate::session::{clear_cookies, current_user, is_logged_in, session_cookie, user_cookie, SESSION_COOKIE};
use crate::templates::{
    base_html, render_answer, render_ask, render_error_page, render_group_detail, render_groups_list, render_login,
    render_note_form, render_note_view, render_notes_list, render_register, render_search, Flash, SearchFormValues,
    ViewMode,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

// ============================================================================
// Helpers
// ============================================================================

fn page(title: &str, content: &str, jar: &CookieJar) -> Html<String> {
    Html(base_html(title, content, current_user(jar).as_deref()))
}

/// The live session token, if any.
fn session_token(jar: &CookieJar) -> Option<String> {
    if !is_logged_in(jar) {
        return None;
    }
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

fn with_cookies(cookies: impl IntoIterator<Item = String>, to: &str) -> Response {
    let mut headers = HeaderMap::new();
    for cookie in cookies {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "dropping unencodable cookie"),
        }
    }
    (headers, Redirect::to(to)).into_response()
}

/// Session is gone or was rejected upstream: forget it and go to login.
fn logged_out() -> Response {
    with_cookies(clear_cookies(), &Route::Login.path())
}

fn failure_page(jar: &CookieJar, err: ClientError, back: Route, back_label: &str) -> Response {
    if err.is_unauthorized() {
        return logged_out();
    }
    let status = err
        .status()
        .and_then(|s| StatusCode::from_u16(s).ok())
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY);
    let html = render_error_page(&err.to_string(), &back, back_label);
    (status, page("Error", &html, jar)).into_response()
}

/// Where a list action redirects to, preserving the view mode.
pub fn list_location(base: &str, mode: ViewMode, extra: Option<(&str, String)>) -> String {
    let mut location = format!("{}?view={}", base, mode.as_str());
    if let Some((key, value)) = extra {
        location.push_str(&format!("&{}={}", key, urlencoding::encode(&value)));
    }
    location
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub view: Option<String>,
    pub deleted: Option<usize>,
    pub failed: Option<usize>,
    pub error: Option<String>,
    pub clustered: Option<bool>,
}

impl ListQuery {
    fn mode(&self) -> ViewMode {
        ViewMode::parse(self.view.as_deref())
    }

    /// Redirects back from list actions always carry `view`; a bare list URL
    /// (nav bar, after creating a note) opens a new list view.
    pub fn is_fresh_visit(&self) -> bool {
        self.view.is_none()
    }

    /// The message left by the action that redirected here.
    pub fn flash(&self, noun: &str) -> Option<Flash> {
        if let Some(failed) = self.failed {
            return Some(Flash::error(format!("Failed to delete {} {}(s)", failed, noun)));
        }
        if let Some(error) = self.error.as_deref().filter(|e| !e.is_empty()) {
            return Some(Flash::error(error));
        }
        if let Some(deleted) = self.deleted {
            return Some(Flash::success(format!("Deleted {} {}(s)", deleted, noun)));
        }
        if self.clustered == Some(true) {
            return Some(Flash::success("Notes grouped."));
        }
        None
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ModeQuery {
    pub view: Option<String>,
    pub return_to: Option<String>,
}

impl ModeQuery {
    fn mode(&self) -> ViewMode {
        ViewMode::parse(self.view.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReturnQuery {
    pub return_to: Option<String>,
}

/// Redirect for a finished bulk delete, or the logout redirect when the API
/// rejected the session.
fn bulk_delete_redirect<Id>(
    base: &str,
    mode: ViewMode,
    outcome: Result<BulkDeleteOutcome<Id>, SelectionError>,
) -> Response {
    let location = match outcome {
        Ok(BulkDeleteOutcome::Skipped) => list_location(base, mode, None),
        Ok(BulkDeleteOutcome::Deleted { count }) => list_location(base, mode, Some(("deleted", count.to_string()))),
        Ok(BulkDeleteOutcome::Reconciled { failed, failures, .. }) => {
            if failures.iter().any(|(_, e)| e.is_unauthorized()) {
                return logged_out();
            }
            list_location(base, mode, Some(("failed", failed.to_string())))
        }
        Err(SelectionError::Reconcile { failed, source }) => {
            if source.is_unauthorized() {
                return logged_out();
            }
            tracing::error!(failed, error = %source, "reload after failed bulk delete also failed");
            list_location(base, mode, Some(("failed", failed.to_string())))
        }
    };
    Redirect::to(&location).into_response()
}

// ============================================================================
// Index Handler
// ============================================================================

pub async fn index(jar: CookieJar) -> Redirect {
    if is_logged_in(&jar) {
        Redirect::to(&Route::Notes.path())
    } else {
        Redirect::to(&Route::Login.path())
    }
}

// ============================================================================
// Authentication Handlers
// ============================================================================

#[derive(Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

impl CredentialsForm {
    fn missing_field(&self) -> bool {
        self.username.trim().is_empty() || self.password.is_empty()
    }
}

pub async fn login_page(jar: CookieJar) -> Response {
    if is_logged_in(&jar) {
        return Redirect::to(&Route::Notes.path()).into_response();
    }
    Html(base_html("Login", &render_login(None, ""), None)).into_response()
}

pub async fn login_submit(State(state): State<Arc<AppState>>, Form(form): Form<CredentialsForm>) -> Response {
    let retry = |error: &str| Html(base_html("Login", &render_login(Some(error), &form.username), None)).into_response();

    if form.missing_field() {
        return retry("Please enter username and password");
    }

    let client = state.anonymous_client();
    match client.login(form.username.trim(), &form.password).await {
        Ok(token) => {
            tracing::info!(user = %form.username.trim(), "logged in");
            with_cookies(
                [session_cookie(&token), user_cookie(form.username.trim())],
                &Route::Notes.path(),
            )
        }
        Err(e) => {
            tracing::warn!(user = %form.username.trim(), error = %e, "login failed");
            retry(&e.to_string())
        }
    }
}

pub async fn register_page(jar: CookieJar) -> Response {
    if is_logged_in(&jar) {
        return Redirect::to(&Route::Notes.path()).into_response();
    }
    Html(base_html("Register", &render_register(None, ""), None)).into_response()
}

pub async fn register_submit(State(state): State<Arc<AppState>>, Form(form): Form<CredentialsForm>) -> Response {
    let retry =
        |error: &str| Html(base_html("Register", &render_register(Some(error), &form.username), None)).into_response();

    if form.missing_field() {
        return retry("Please enter username and password");
    }

    let client = state.anonymous_client();
    match client.register(form.username.trim(), &form.password).await {
        Ok(user) => match client.session().token() {
            Some(token) => {
                tracing::info!(user = %user.name, "registered");
                with_cookies([session_cookie(&token), user_cookie(&user.name)], &Route::Notes.path())
            }
            None => retry("Registration succeeded but login failed"),
        },
        Err(e) => {
            tracing::warn!(user = %form.username.trim(), error = %e, "registration failed");
            retry(&e.to_string())
        }
    }
}

pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if let Some(token) = session_token(&jar) {
        state.note_views.discard(&token);
        state.group_views.discard(&token);
    }
    logged_out()
}

// ============================================================================
// Note List Handlers
// ============================================================================

pub async fn notes_list(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<ListQuery>,
) -> Response {
    let Some(token) = session_token(&jar) else {
        return logged_out();
    };

    let notes = match state.client(&jar).list_notes().await {
        Ok(notes) => notes,
        Err(e) => return failure_page(&jar, e, Route::Notes, "Retry"),
    };

    let view = state.note_views.open(&token);
    let mut view = view.lock().await;
    view.replace_items(notes);
    if query.is_fresh_visit() {
        view.deselect_all();
    }

    let html = render_notes_list(&view, query.mode(), query.flash("note").as_ref());
    page("My Notes", &html, &jar).into_response()
}

pub async fn notes_toggle(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<NoteId>,
    Query(query): Query<ModeQuery>,
) -> Response {
    let Some(token) = session_token(&jar) else {
        return logged_out();
    };
    state.note_views.open(&token).lock().await.toggle(id);
    Redirect::to(&list_location("/notes", query.mode(), None)).into_response()
}

pub async fn notes_toggle_all(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<ModeQuery>,
) -> Response {
    let Some(token) = session_token(&jar) else {
        return logged_out();
    };
    state.note_views.open(&token).lock().await.toggle_all();
    Redirect::to(&list_location("/notes", query.mode(), None)).into_response()
}

pub async fn notes_bulk_delete(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<ModeQuery>,
) -> Response {
    let Some(token) = session_token(&jar) else {
        return logged_out();
    };
    let store = state.client(&jar).notes();
    let view = state.note_views.open(&token);
    let outcome = view.lock().await.bulk_delete(&store).await;
    bulk_delete_redirect("/notes", query.mode(), outcome)
}

/// Single delete from a card, the list, a group page or the note itself.
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<NoteId>,
    Query(query): Query<ModeQuery>,
) -> Response {
    let Some(token) = session_token(&jar) else {
        return logged_out();
    };

    if let Err(e) = state.client(&jar).delete_note(id).await {
        if e.is_unauthorized() {
            return logged_out();
        }
        return Redirect::to(&list_location("/notes", query.mode(), Some(("error", e.to_string())))).into_response();
    }

    if let Some(view) = state.note_views.get(&token) {
        view.lock().await.remove_local(id);
    }

    let target = Route::from_return_to(query.return_to.as_deref())
        .map(|route| route.path())
        .unwrap_or_else(|| list_location("/notes", query.mode(), None));
    Redirect::to(&target).into_response()
}

// ============================================================================
// Note Handlers
// ============================================================================

#[derive(Deserialize)]
pub struct NoteForm {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl NoteForm {
    fn draft(&self) -> Result<NoteDraft, &'static str> {
        if self.title.trim().is_empty() {
            return Err("Title is required");
        }
        Ok(NoteDraft {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            group_id: None,
        })
    }
}

pub async fn new_note_page(jar: CookieJar) -> Response {
    if !is_logged_in(&jar) {
        return logged_out();
    }
    page("Create New Note", &render_note_form(None, "", "", None), &jar).into_response()
}

pub async fn create_note(State(state): State<Arc<AppState>>, jar: CookieJar, Form(form): Form<NoteForm>) -> Response {
    if !is_logged_in(&jar) {
        return logged_out();
    }
    let retry = |error: &str| page("Create New Note", &render_note_form(None, &form.title, &form.content, Some(error)), &jar).into_response();

    let draft = match form.draft() {
        Ok(draft) => draft,
        Err(error) => return retry(error),
    };

    match state.client(&jar).create_note(&draft).await {
        Ok(note) => {
            tracing::info!(id = note.id, "note created");
            Redirect::to(&Route::Notes.path()).into_response()
        }
        Err(e) if e.is_unauthorized() => logged_out(),
        Err(e) => retry(&e.to_string()),
    }
}

pub async fn view_note(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<NoteId>,
    Query(query): Query<ReturnQuery>,
) -> Response {
    if !is_logged_in(&jar) {
        return logged_out();
    }
    let back = Route::from_return_to(query.return_to.as_deref()).unwrap_or(Route::Notes);

    match state.client(&jar).get_note(id).await {
        Ok(note) => page(&note.title, &render_note_view(&note, &back), &jar).into_response(),
        Err(e) => failure_page(&jar, e, back, "Back"),
    }
}

pub async fn edit_note_page(State(state): State<Arc<AppState>>, jar: CookieJar, Path(id): Path<NoteId>) -> Response {
    if !is_logged_in(&jar) {
        return logged_out();
    }
    match state.client(&jar).get_note(id).await {
        Ok(note) => page(
            "Edit Note",
            &render_note_form(Some(note.id), &note.title, &note.content, None),
            &jar,
        )
        .into_response(),
        Err(e) => failure_page(&jar, e, Route::Notes, "Back to Notes"),
    }
}

pub async fn update_note(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<NoteId>,
    Form(form): Form<NoteForm>,
) -> Response {
    if !is_logged_in(&jar) {
        return logged_out();
    }
    let retry = |error: &str| page("Edit Note", &render_note_form(Some(id), &form.title, &form.content, Some(error)), &jar).into_response();

    let draft = match form.draft() {
        Ok(draft) => draft,
        Err(error) => return retry(error),
    };

    match state.client(&jar).update_note(id, &draft).await {
        Ok(note) => Redirect::to(&Route::Note { id: note.id, return_to: None }.path()).into_response(),
        Err(e) if e.is_unauthorized() => logged_out(),
        Err(e) => retry(&e.to_string()),
    }
}

// ============================================================================
// Group Handlers
// ============================================================================

pub async fn groups_list(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<ListQuery>,
) -> Response {
    let Some(token) = session_token(&jar) else {
        return logged_out();
    };

    let groups = match state.client(&jar).list_groups().await {
        Ok(groups) => groups,
        Err(e) => return failure_page(&jar, e, Route::Groups, "Retry"),
    };

    let view = state.group_views.open(&token);
    let mut view = view.lock().await;
    view.replace_items(groups);
    if query.is_fresh_visit() {
        view.deselect_all();
    }

    let html = render_groups_list(&view, query.mode(), query.flash("group").as_ref());
    page("My Groups", &html, &jar).into_response()
}

pub async fn groups_toggle(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<GroupId>,
    Query(query): Query<ModeQuery>,
) -> Response {
    let Some(token) = session_token(&jar) else {
        return logged_out();
    };
    state.group_views.open(&token).lock().await.toggle(id);
    Redirect::to(&list_location("/groups", query.mode(), None)).into_response()
}

pub async fn groups_toggle_all(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<ModeQuery>,
) -> Response {
    let Some(token) = session_token(&jar) else {
        return logged_out();
    };
    state.group_views.open(&token).lock().await.toggle_all();
    Redirect::to(&list_location("/groups", query.mode(), None)).into_response()
}

pub async fn groups_bulk_delete(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<ModeQuery>,
) -> Response {
    let Some(token) = session_token(&jar) else {
        return logged_out();
    };
    let store = state.client(&jar).groups();
    let view = state.group_views.open(&token);
    let outcome = view.lock().await.bulk_delete(&store).await;
    bulk_delete_redirect("/groups", query.mode(), outcome)
}

pub async fn delete_group(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<GroupId>,
    Query(query): Query<ModeQuery>,
) -> Response {
    let Some(token) = session_token(&jar) else {
        return logged_out();
    };

    if let Err(e) = state.client(&jar).delete_group(id).await {
        if e.is_unauthorized() {
            return logged_out();
        }
        return Redirect::to(&list_location("/groups", query.mode(), Some(("error", e.to_string())))).into_response();
    }

    if let Some(view) = state.group_views.get(&token) {
        view.lock().await.remove_local(id);
    }
    Redirect::to(&list_location("/groups", query.mode(), None)).into_response()
}

pub async fn clusterize(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if !is_logged_in(&jar) {
        return logged_out();
    }
    let location = match state.client(&jar).clusterize().await {
        Ok(_) => {
            tracing::info!("notes clustered");
            list_location("/groups", ViewMode::default(), Some(("clustered", "true".to_string())))
        }
        Err(e) if e.is_unauthorized() => return logged_out(),
        Err(e) => list_location("/groups", ViewMode::default(), Some(("error", e.to_string()))),
    };
    Redirect::to(&location).into_response()
}

pub async fn view_group(State(state): State<Arc<AppState>>, jar: CookieJar, Path(id): Path<GroupId>) -> Response {
    if !is_logged_in(&jar) {
        return logged_out();
    }
    match state.client(&jar).get_group(id).await {
        Ok(group) => page(&group.display_title(), &render_group_detail(&group), &jar).into_response(),
        Err(e) => failure_page(&jar, e, Route::Groups, "Back to Groups"),
    }
}

// ============================================================================
// Ask / Answer Handlers
// ============================================================================

#[derive(Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub query: String,
}

async fn ask_page_with(state: &AppState, jar: &CookieJar, query: &str, error: Option<&str>) -> Response {
    let mut answers = match state.client(jar).list_answers().await {
        Ok(answers) => answers,
        Err(e) if e.is_unauthorized() => return logged_out(),
        Err(e) => {
            tracing::warn!(error = %e, "could not load previous answers");
            Vec::new()
        }
    };
    answers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    page("Ask", &render_ask(&answers, query, error), jar).into_response()
}

pub async fn ask_page(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if !is_logged_in(&jar) {
        return logged_out();
    }
    ask_page_with(&state, &jar, "", None).await
}

pub async fn ask_submit(State(state): State<Arc<AppState>>, jar: CookieJar, Form(form): Form<AskForm>) -> Response {
    if !is_logged_in(&jar) {
        return logged_out();
    }
    let query = form.query.trim();
    if query.is_empty() {
        return ask_page_with(&state, &jar, "", Some("Please enter a question")).await;
    }

    match state.client(&jar).ask(query).await {
        Ok(answer) => Redirect::to(&Route::Answer(answer.answer_id).path()).into_response(),
        Err(e) if e.is_unauthorized() => logged_out(),
        Err(e) => ask_page_with(&state, &jar, query, Some(&e.to_string())).await,
    }
}

pub async fn view_answer(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<AnswerId>,
    Query(query): Query<ReturnQuery>,
) -> Response {
    if !is_logged_in(&jar) {
        return logged_out();
    }
    let back = Route::from_return_to(query.return_to.as_deref()).unwrap_or(Route::Ask);

    match state.client(&jar).get_answer(id).await {
        Ok(answer) => page(&answer.title, &render_answer(&answer, &back, None), &jar).into_response(),
        Err(e) => failure_page(&jar, e, Route::Ask, "Back to Ask"),
    }
}

/// A click on `[n]` in an answer: navigate to the cited note, remembering
/// the answer as the place to come back to.
pub async fn follow_citation(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path((id, number)): Path<(AnswerId, String)>,
) -> Response {
    if !is_logged_in(&jar) {
        return logged_out();
    }
    let answer = match state.client(&jar).get_answer(id).await {
        Ok(answer) => answer,
        Err(e) => return failure_page(&jar, e, Route::Ask, "Back to Ask"),
    };

    let here = Route::Answer(id);
    let nodes = inline_nodes(&answer.answer_text, &answer.references);
    let mut navigator = RedirectNavigator::new();
    match citations(&nodes).find(|widget| widget.number() == number) {
        Some(widget) => {
            widget.activate(&mut Activation::returning_to(here.path()), &mut navigator);
        }
        None => {
            tracing::debug!(answer = id, %number, "no resolved citation with that number");
            navigator.navigate(here);
        }
    }

    let target = navigator.into_target().unwrap_or(Route::Answer(id));
    Redirect::to(&target.path()).into_response()
}

pub async fn delete_answer(State(state): State<Arc<AppState>>, jar: CookieJar, Path(id): Path<AnswerId>) -> Response {
    if !is_logged_in(&jar) {
        return logged_out();
    }
    match state.client(&jar).delete_answer(id).await {
        Ok(()) => Redirect::to(&Route::Ask.path()).into_response(),
        Err(e) => failure_page(&jar, e, Route::Answer(id), "Back to Answer"),
    }
}

/// "Add to Notes": the API turns the answer into a note and drops the answer.
pub async fn convert_answer(State(state): State<Arc<AppState>>, jar: CookieJar, Path(id): Path<AnswerId>) -> Response {
    if !is_logged_in(&jar) {
        return logged_out();
    }
    match state.client(&jar).convert_answer_to_note(id).await {
        Ok(note) => Redirect::to(&Route::Note { id: note.id, return_to: None }.path()).into_response(),
        Err(e) => failure_page(&jar, e, Route::Answer(id), "Back to Answer"),
    }
}

// ============================================================================
// Search Handler
// ============================================================================

#[derive(Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub k: Option<String>,
    pub threshold: Option<String>,
}

/// Check the search form. `k` must be a positive integer and the threshold
/// a number in `0..=1`.
pub fn validate_search(form: &SearchFormValues) -> Result<SearchRequest, &'static str> {
    let query = form.query.trim();
    if query.is_empty() {
        return Err("Please enter a search query");
    }

    let k = match form.k.trim().parse::<u32>() {
        Ok(k) if k >= 1 => k,
        _ => return Err("k must be a positive integer"),
    };

    let threshold = match form.threshold.trim().parse::<f64>() {
        Ok(t) if (0.0..=1.0).contains(&t) => t,
        _ => return Err("Threshold must be a number between 0 and 1"),
    };

    Ok(SearchRequest {
        query: query.to_string(),
        k,
        threshold,
    })
}

pub async fn search(State(state): State<Arc<AppState>>, jar: CookieJar, Query(params): Query<SearchQuery>) -> Response {
    if !is_logged_in(&jar) {
        return logged_out();
    }

    let form = SearchFormValues {
        query: params.query.clone().unwrap_or_default(),
        k: params.k.unwrap_or_else(|| state.config.search_k.to_string()),
        threshold: params.threshold.unwrap_or_else(|| state.config.search_threshold.to_string()),
    };

    // First visit: just the form.
    if params.query.is_none() {
        return page("Search", &render_search(&form, None, None), &jar).into_response();
    }

    let request = match validate_search(&form) {
        Ok(request) => request,
        Err(error) => return page("Search", &render_search(&form, None, Some(error)), &jar).into_response(),
    };

    match state.client(&jar).search(&request).await {
        Ok(response) => {
            let mut results = response.results;
            results.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
            tracing::debug!(query = %request.query, hits = results.len(), "search");
            page("Search", &render_search(&form, Some(results.as_slice()), None), &jar).into_response()
        }
        Err(e) if e.is_unauthorized() => logged_out(),
        Err(e) => page("Search", &render_search(&form, Some([].as_slice()), Some(&e.to_string())), &jar).into_response(),
    }
}
