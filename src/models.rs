//! Data models for the notes client.
//!
//! These mirror the JSON payloads of the remote notes API: notes, groups,
//! answers with their citation references, search hits and auth tokens.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

pub type NoteId = i64;
pub type GroupId = i64;
pub type AnswerId = i64;

// ============================================================================
// Citation References
// ============================================================================

/// A source chunk that a citation marker points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub chunk_text: String,
    pub note_id: NoteId,
    #[serde(default)]
    pub chunk_id: Option<i64>,
}

/// Citation number (as a decimal string) to the reference it resolves to.
pub type ReferenceMap = HashMap<String, Reference>;

// ============================================================================
// Notes and Groups
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
    /// Present on notes converted from answers; empty for hand-written notes.
    #[serde(default)]
    pub references: ReferenceMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Group {
    /// Display title: the cluster summary, or a numbered fallback.
    pub fn display_title(&self) -> String {
        match self.summary.as_deref().map(str::trim) {
            Some(summary) if !summary.is_empty() => summary.to_string(),
            _ => format!("Group {}", self.id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
}

// ============================================================================
// Answers
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AskRequest {
    pub query: String,
    pub k: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AskResponse {
    pub answer_id: AnswerId,
    pub title: String,
    pub answer_text: String,
    #[serde(default)]
    pub references: ReferenceMap,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub question: String,
    pub answer_text: String,
    pub title: String,
    #[serde(default)]
    pub references: ReferenceMap,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Search
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub k: u32,
    pub threshold: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub note: Note,
    #[serde(default)]
    pub chunk_text: Option<String>,
    #[serde(default)]
    pub chunk_start: Option<usize>,
    #[serde(default)]
    pub chunk_end: Option<usize>,
    pub relevance_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

// ============================================================================
// Timestamps
// ============================================================================

/// Accepts RFC 3339 timestamps as well as the naive ISO-8601 form the API
/// emits for timezone-less columns, which are taken to be UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}
