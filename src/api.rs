//! HTTP client for the remote notes API.
//!
//! Every call goes through [`ApiClient::send`], which attaches the session's
//! bearer token and maps non-success responses to [`ClientError::Api`] using
//! the server's `detail` message when it sends one.

use crate::config::Config;
use crate::error::ClientError;
use crate::models::{
    Answer, AnswerId, AskRequest, AskResponse, Credentials, Group, GroupId, Note,
    NoteDraft, NoteId, SearchRequest, SearchResponse, TokenResponse, User,
};
use crate::selection::RemoteCollection;
use crate::session::SessionProvider;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<Config>,
    session: Arc<dyn SessionProvider>,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, config: Arc<Config>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            http,
            config,
            session,
        }
    }

    /// Shared `reqwest::Client` with the configured request timeout.
    pub fn build_http(config: &Config) -> Result<reqwest::Client, ClientError> {
        Ok(reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?)
    }

    pub fn session(&self) -> &Arc<dyn SessionProvider> {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.config.endpoint(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, fallback: &str) -> Result<Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body).unwrap_or_else(|| fallback.to_string());
        tracing::warn!(status = status.as_u16(), %detail, "API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T, ClientError> {
        tracing::debug!(path, "GET");
        let response = self.send(self.request(Method::GET, path), fallback).await?;
        Ok(response.json().await?)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B, fallback: &str) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(%method, path, "send");
        let response = self.send(self.request(method, path).json(body), fallback).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, path: &str, fallback: &str) -> Result<(), ClientError> {
        tracing::debug!(path, "DELETE");
        self.send(self.request(Method::DELETE, path), fallback).await?;
        Ok(())
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Log in and store the issued token in the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let token: TokenResponse = self
            .send_json(Method::POST, "/auth/login", &credentials, "Login failed")
            .await?;
        self.session.set_token(token.access_token.clone());
        Ok(token.access_token)
    }

    /// Register, then log straight in with the same credentials.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, ClientError> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let user: User = self
            .send_json(Method::POST, "/auth/register", &credentials, "Registration failed")
            .await?;
        self.login(username, password).await?;
        Ok(user)
    }

    // ========================================================================
    // Notes
    // ========================================================================

    pub async fn list_notes(&self) -> Result<Vec<Note>, ClientError> {
        self.get_json("/notes", "Failed to fetch notes").await
    }

    pub async fn get_note(&self, id: NoteId) -> Result<Note, ClientError> {
        self.get_json(&format!("/notes/{}", id), "Failed to fetch note").await
    }

    pub async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ClientError> {
        self.send_json(Method::POST, "/notes", draft, "Failed to create note").await
    }

    pub async fn update_note(&self, id: NoteId, draft: &NoteDraft) -> Result<Note, ClientError> {
        self.send_json(Method::PUT, &format!("/notes/{}", id), draft, "Failed to update note")
            .await
    }

    pub async fn delete_note(&self, id: NoteId) -> Result<(), ClientError> {
        self.delete(&format!("/notes/{}", id), "Failed to delete note").await
    }

    // ========================================================================
    // Groups
    // ========================================================================

    pub async fn list_groups(&self) -> Result<Vec<Group>, ClientError> {
        self.get_json("/groups", "Failed to fetch groups").await
    }

    pub async fn get_group(&self, id: GroupId) -> Result<Group, ClientError> {
        self.get_json(&format!("/groups/{}", id), "Failed to fetch group").await
    }

    pub async fn delete_group(&self, id: GroupId) -> Result<(), ClientError> {
        self.delete(&format!("/groups/{}", id), "Failed to delete group").await
    }

    /// Ask the API to (re)cluster the user's notes into groups.
    pub async fn clusterize(&self) -> Result<serde_json::Value, ClientError> {
        self.send_json(
            Method::POST,
            "/groups/clusterize",
            &serde_json::json!({}),
            "Failed to clusterize notes",
        )
        .await
    }

    // ========================================================================
    // Answers
    // ========================================================================

    pub async fn ask(&self, query: &str) -> Result<AskResponse, ClientError> {
        let request = AskRequest {
            query: query.to_string(),
            k: self.config.ask_k,
        };
        self.send_json(Method::POST, "/ask", &request, "Failed to ask question").await
    }

    pub async fn get_answer(&self, id: AnswerId) -> Result<Answer, ClientError> {
        self.get_json(&format!("/ask/answer/{}", id), "Failed to get answer").await
    }

    pub async fn list_answers(&self) -> Result<Vec<Answer>, ClientError> {
        self.get_json("/ask/answers", "Failed to get answers").await
    }

    pub async fn delete_answer(&self, id: AnswerId) -> Result<(), ClientError> {
        self.delete(&format!("/ask/answer/{}", id), "Failed to delete answer").await
    }

    pub async fn convert_answer_to_note(&self, id: AnswerId) -> Result<Note, ClientError> {
        self.send_json(
            Method::POST,
            &format!("/ask/answer/{}/convert-to-note", id),
            &serde_json::json!({}),
            "Failed to convert answer to note",
        )
        .await
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        self.send_json(Method::POST, "/search", request, "Failed to search notes").await
    }

    // ========================================================================
    // Collections
    // ========================================================================

    pub fn notes(&self) -> NoteStore {
        NoteStore(self.clone())
    }

    pub fn groups(&self) -> GroupStore {
        GroupStore(self.clone())
    }
}

/// Pull a human-readable message out of an error body. FastAPI sends
/// `{"detail": "..."}`, or a list of validation errors with `msg` fields.
pub fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(str::to_string)
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

// ============================================================================
// Remote Collections
// ============================================================================

/// The notes collection, as seen by list views.
#[derive(Clone)]
pub struct NoteStore(ApiClient);

#[async_trait]
impl RemoteCollection for NoteStore {
    type Item = Note;

    async fn list(&self) -> Result<Vec<Note>, ClientError> {
        self.0.list_notes().await
    }

    async fn delete(&self, id: NoteId) -> Result<(), ClientError> {
        self.0.delete_note(id).await
    }
}

/// The groups collection, as seen by list views.
#[derive(Clone)]
pub struct GroupStore(ApiClient);

#[async_trait]
impl RemoteCollection for GroupStore {
    type Item = Group;

    async fn list(&self) -> Result<Vec<Group>, ClientError> {
        self.0.list_groups().await
    }

    async fn delete(&self, id: GroupId) -> Result<(), ClientError> {
        self.0.delete_group(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_string() {
        assert_eq!(
            extract_detail(r#"{"detail": "Note not found"}"#).as_deref(),
            Some("Note not found")
        );
    }

    #[test]
    fn test_extract_detail_validation_list() {
        let body = r#"{"detail": [{"loc": ["body", "title"], "msg": "field required"}]}"#;
        assert_eq!(extract_detail(body).as_deref(), Some("field required"));
    }

    #[test]
    fn test_extract_detail_missing_or_garbage() {
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(r#"{"error": "x"}"#), None);
        assert_eq!(extract_detail(r#"{"detail": ""}"#), None);
    }
}
