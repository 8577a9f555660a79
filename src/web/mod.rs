//! Web API module for TutorHub.
//!
//! This module exposes the site's HTTP surface: the tutor listing,
//! account routes, the dashboard, post creation, and tutor contact pages.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::{create_app, create_router};
pub use server::WebServer;
