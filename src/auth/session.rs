//! Session management for TutorHub.
//!
//! Sessions are held in process memory, keyed by the random token that the
//! browser carries in the `sid` cookie. Each session also carries the
//! lazy-registration slot: a pending action captured from a logged-out
//! visitor, replayed once after they authenticate.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use super::password::generate_token;

/// Default session expiry (24 hours).
pub const DEFAULT_SESSION_EXPIRY_SECS: u64 = 86400;

/// Session-related errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// No session exists for the presented token.
    #[error("session not found")]
    NotFound,

    /// Session exists but has expired.
    #[error("session expired")]
    Expired,

    /// Login failed. Deliberately does not say whether the email or the
    /// password was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// A pending action captured before login and replayed after it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LazyRegistration {
    /// Route to send the user back to after authentication.
    pub referring_page: String,
    /// The captured form content.
    pub payload: LazyPayload,
}

/// Form content captured by the lazy-registration flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LazyPayload {
    /// A tutor post draft submitted while logged out.
    TutorPostForm {
        course_number: String,
        major_short_name: String,
        post_details: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<Vec<u8>>,
    },
    /// A message typed into a tutor's contact form while logged out.
    MessageDraft { text: String },
}

/// Per-session state.
#[derive(Debug, Clone)]
struct SessionData {
    user_id: Option<i64>,
    first_name: Option<String>,
    is_tutor: bool,
    lazy_registration: Option<LazyRegistration>,
    expires_at: DateTime<Utc>,
}

/// Snapshot of the session handed to request handlers.
#[derive(Debug, Clone, Serialize)]
pub struct Viewer {
    /// True when the session belongs to an authenticated user.
    pub login_validated: bool,
    /// Authenticated user id, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// First name for the page header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Tutor flag carried for the dashboard; not currently set anywhere.
    pub is_tutor: bool,
}

impl Viewer {
    /// The anonymous viewer, used when no session cookie is presented.
    pub fn anonymous() -> Self {
        Self {
            login_validated: false,
            user_id: None,
            first_name: None,
            is_tutor: false,
        }
    }
}

/// In-process session store.
///
/// Cloning is cheap; all clones share the same map.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionData>>>,
    expiry: Duration,
}

impl SessionStore {
    /// Create a session store with the given expiry.
    pub fn new(expiry_secs: u64) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            expiry: Duration::from_secs(expiry_secs),
        }
    }

    fn fresh_data(&self) -> SessionData {
        SessionData {
            user_id: None,
            first_name: None,
            is_tutor: false,
            lazy_registration: None,
            expires_at: Utc::now() + self.expiry,
        }
    }

    /// Create a new anonymous session and return its token.
    pub async fn create(&self) -> String {
        let token = generate_token();
        let mut sessions = self.sessions.lock().await;
        sessions.insert(token.clone(), self.fresh_data());
        debug!("Created session {}", token);
        token
    }

    /// Make sure a session exists for the token, creating a fresh anonymous
    /// one when missing. Covers clients presenting a cookie from before a
    /// restart or past expiry.
    pub async fn ensure(&self, token: &str) {
        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(token.to_string())
            .or_insert_with(|| self.fresh_data());
    }

    /// Look up the viewer for a token.
    ///
    /// Expired sessions are removed and treated as missing.
    pub async fn viewer(&self, token: &str) -> Option<Viewer> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(token) {
            Some(data) if data.expires_at > Utc::now() => Some(Viewer {
                login_validated: data.user_id.is_some(),
                user_id: data.user_id,
                first_name: data.first_name.clone(),
                is_tutor: data.is_tutor,
            }),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Mark a session as authenticated.
    ///
    /// The lazy-registration slot survives login so the captured action can
    /// be replayed on the next page load.
    pub async fn login(&self, token: &str, user_id: i64, first_name: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock().await;
        let data = sessions.get_mut(token).ok_or(SessionError::NotFound)?;
        if data.expires_at <= Utc::now() {
            sessions.remove(token);
            return Err(SessionError::Expired);
        }
        data.user_id = Some(user_id);
        data.first_name = Some(first_name.to_string());
        data.expires_at = Utc::now() + self.expiry;
        debug!("Session {} authenticated as user {}", token, user_id);
        Ok(())
    }

    /// Store a lazy-registration payload on the session, creating the
    /// session first if the token is unknown.
    pub async fn set_lazy(&self, token: &str, lazy: LazyRegistration) {
        let mut sessions = self.sessions.lock().await;
        let data = sessions
            .entry(token.to_string())
            .or_insert_with(|| self.fresh_data());
        data.lazy_registration = Some(lazy);
    }

    /// Take the lazy-registration payload, leaving the slot empty.
    ///
    /// At-most-once: a second call returns `None` until a new payload is
    /// stored.
    pub async fn take_lazy(&self, token: &str) -> Option<LazyRegistration> {
        let mut sessions = self.sessions.lock().await;
        sessions.get_mut(token)?.lazy_registration.take()
    }

    /// Peek at the referring page of a pending lazy registration.
    pub async fn lazy_referring_page(&self, token: &str) -> Option<String> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(token)?
            .lazy_registration
            .as_ref()
            .map(|l| l.referring_page.clone())
    }

    /// Discard any pending lazy registration.
    ///
    /// Called from routes that are not part of the capture/replay detour,
    /// so a stale draft never resurfaces later.
    pub async fn clear_lazy(&self, token: &str) {
        let mut sessions = self.sessions.lock().await;
        if let Some(data) = sessions.get_mut(token) {
            data.lazy_registration = None;
        }
    }

    /// Remove a session entirely (logout).
    pub async fn remove(&self, token: &str) {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(token);
    }

    /// Drop all expired sessions. Returns the number removed.
    pub async fn cleanup(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, data| data.expires_at > now);
        before - sessions.len()
    }

    /// Number of live sessions (including expired-but-not-swept ones).
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// True when no sessions exist.
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_EXPIRY_SECS)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish()
    }
}
