//! Session management.
//!
//! The API issues a bearer token at login. The browser keeps it in an
//! HttpOnly cookie; inside a request the token lives in a [`SessionProvider`]
//! handed to the API client, so nothing reads cookies or globals behind the
//! client's back.

use axum_extra::extract::CookieJar;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Mutex;

/// Session cookie name
pub const SESSION_COOKIE: &str = "notes_session";

/// Display-name cookie name
pub const USER_COOKIE: &str = "notes_user";

/// Cookie lifetime in hours. The token's own `exp` claim wins if sooner.
pub const SESSION_TTL_HOURS: i64 = 24;

// ============================================================================
// Session Provider
// ============================================================================

/// Where the API client gets its bearer token from.
pub trait SessionProvider: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: String);
    fn clear(&self);
}

/// Token held in memory for the duration of one request (or one test).
#[derive(Debug, Default)]
pub struct MemorySession {
    token: Mutex<Option<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token: Mutex::new(token),
        }
    }

    /// Seed from the request's session cookie, skipping expired tokens.
    pub fn from_cookies(jar: &CookieJar) -> Self {
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty() && !token_expired(t));
        Self::with_token(token)
    }
}

impl SessionProvider for MemorySession {
    fn token(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_token(&self, token: String) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token);
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

// ============================================================================
// Token Inspection
// ============================================================================

#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Whether a JWT's `exp` claim is in the past. Tokens that are not JWTs, or
/// carry no `exp`, are treated as live; the API will reject them if not.
pub fn token_expired(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return false;
    }

    let payload = match URL_SAFE_NO_PAD.decode(parts[1].trim_end_matches('=')) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    match serde_json::from_slice::<Claims>(&payload) {
        Ok(Claims { exp: Some(exp) }) => Utc::now().timestamp() >= exp,
        _ => false,
    }
}

/// Check if the user is logged in via cookie
pub fn is_logged_in(jar: &CookieJar) -> bool {
    match jar.get(SESSION_COOKIE) {
        Some(cookie) => !cookie.value().is_empty() && !token_expired(cookie.value()),
        None => false,
    }
}

/// Display name remembered at login.
pub fn current_user(jar: &CookieJar) -> Option<String> {
    let raw = jar.get(USER_COOKIE)?.value().to_string();
    urlencoding::decode(&raw).ok().map(|name| name.into_owned())
}

// ============================================================================
// Cookie Headers
// ============================================================================

pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; Secure; SameSite=Strict; Max-Age={}",
        SESSION_COOKIE,
        token,
        SESSION_TTL_HOURS * 3600
    )
}

pub fn user_cookie(name: &str) -> String {
    format!(
        "{}={}; Path=/; Secure; SameSite=Strict; Max-Age={}",
        USER_COOKIE,
        urlencoding::encode(name),
        SESSION_TTL_HOURS * 3600
    )
}

/// Headers that expire both session cookies.
pub fn clear_cookies() -> [String; 2] {
    [
        format!("{}=; Path=/; HttpOnly; Secure; Max-Age=0", SESSION_COOKIE),
        format!("{}=; Path=/; Secure; Max-Age=0", USER_COOKIE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Cookie;

    fn jwt_with_exp(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"1","exp":{}}}"#, exp));
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn test_token_expiry_from_claims() {
        let now = Utc::now().timestamp();
        assert!(token_expired(&jwt_with_exp(now - 10)));
        assert!(!token_expired(&jwt_with_exp(now + 3600)));
    }

    #[test]
    fn test_opaque_tokens_are_not_expired() {
        assert!(!token_expired("opaque-token"));
        assert!(!token_expired("a.!!!.c"));
    }

    #[test]
    fn test_memory_session_roundtrip() {
        let session = MemorySession::new();
        assert_eq!(session.token(), None);
        session.set_token("abc".to_string());
        assert_eq!(session.token().as_deref(), Some("abc"));
        session.clear();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_from_cookies_drops_expired_token() {
        let expired = jwt_with_exp(Utc::now().timestamp() - 1);
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, expired));
        assert!(!is_logged_in(&jar));
        assert_eq!(MemorySession::from_cookies(&jar).token(), None);

        let live = jwt_with_exp(Utc::now().timestamp() + 60);
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, live.clone()));
        assert!(is_logged_in(&jar));
        assert_eq!(MemorySession::from_cookies(&jar).token(), Some(live));
    }

    #[test]
    fn test_user_cookie_roundtrip() {
        let header = user_cookie("Ada Lovelace");
        assert!(header.starts_with("notes_user=Ada%20Lovelace;"));
        let jar = CookieJar::new().add(Cookie::new(USER_COOKIE, "Ada%20Lovelace"));
        assert_eq!(current_user(&jar).as_deref(), Some("Ada Lovelace"));
    }
}
