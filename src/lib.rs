//! TutorHub - a tutoring marketplace backend
//!
//! Students register with a campus email, search approved tutor posts by
//! course or tutor, publish their own posts, and message each other.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod message;
pub mod post;
pub mod search;
pub mod web;

pub use auth::{
    attempt_login, generate_token, hash_for_registration, register, validate_password, verify,
    LazyPayload, LazyRegistration, PasswordData, PasswordError, RegistrationError,
    RegistrationRequest, SessionError, SessionStore, Viewer,
};
pub use catalog::{CatalogRepository, Course, CourseOption, Major, MajorLists};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{Result, TutorHubError};
pub use message::{InboxMessage, MessageRepository};
pub use post::{
    create_post, resolve_slug, send_contact_message, CreatePostRequest, PostError, PostRepository,
    TutorPostDetail, TutorSlug,
};
pub use search::{run_search, FilterBranch, SearchPage, SearchResult, PAGE_SIZE};
pub use web::WebServer;
