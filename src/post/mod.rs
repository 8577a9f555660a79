//! Tutor post lifecycle: creation with thumbnails, slug-based detail
//! lookup, and contact messaging.

mod repository;
mod service;
mod thumbnail;

pub use repository::{NewTutorPost, PostRepository, TutorPostDetail};
pub use service::{
    create_post, resolve_slug, send_contact_message, CreatePostRequest, PostError, TutorSlug,
};
pub use thumbnail::{generate as generate_thumbnail, ThumbnailError, THUMBNAIL_WIDTH};
