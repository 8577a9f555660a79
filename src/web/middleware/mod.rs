//! Middleware for the web layer.

pub mod cors;
pub mod session;

pub use cors::create_cors_layer;
pub use session::{session_layer, CurrentUser, CurrentViewer, SessionToken, SESSION_COOKIE};
