//! Request handlers for the web layer.

pub mod auth;
pub mod dashboard;
pub mod post;
pub mod search;
pub mod tutor;

pub use auth::*;
pub use dashboard::*;
pub use post::*;
pub use search::*;
pub use tutor::*;

use crate::auth::SessionStore;
use crate::db::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (pooled; clones share the pool).
    pub db: Database,
    /// In-process session store.
    pub sessions: SessionStore,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, sessions: SessionStore) -> Self {
        Self { db, sessions }
    }
}
