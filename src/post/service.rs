//! Tutor post creation, slug resolution, and contact messaging.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use crate::catalog::CatalogRepository;
use crate::message::MessageRepository;
use crate::TutorHubError;

use super::repository::{NewTutorPost, PostRepository, TutorPostDetail};
use super::thumbnail::{self, ThumbnailError};

/// Errors from the post lifecycle.
#[derive(Error, Debug)]
pub enum PostError {
    /// The submitted major does not exist.
    #[error("unknown major")]
    UnknownMajor,

    /// The submitted course number does not exist within the major.
    #[error("unknown course")]
    UnknownCourse,

    /// Post details are missing.
    #[error("post details are required")]
    MissingDetails,

    /// The uploaded image could not be turned into a thumbnail.
    #[error(transparent)]
    Thumbnail(#[from] ThumbnailError),

    /// Storage-level failure.
    #[error(transparent)]
    Storage(#[from] TutorHubError),
}

/// Input for creating a tutor post.
#[derive(Debug, Clone)]
pub struct CreatePostRequest {
    pub user_id: i64,
    pub major_short_name: String,
    pub course_number: String,
    pub details: String,
    pub image: Option<Vec<u8>>,
}

/// Create a tutor post.
///
/// Resolves major then course sequentially, derives the thumbnail before
/// touching the database, and inserts an unapproved row. A thumbnail
/// failure means no row is written.
pub async fn create_post(pool: &SqlitePool, request: CreatePostRequest) -> Result<i64, PostError> {
    if request.details.trim().is_empty() {
        return Err(PostError::MissingDetails);
    }

    let catalog = CatalogRepository::new(pool);
    let major_id = catalog
        .major_id_by_short_name(&request.major_short_name)
        .await?
        .ok_or(PostError::UnknownMajor)?;
    let course_id = catalog
        .course_id(major_id, &request.course_number)
        .await?
        .ok_or(PostError::UnknownCourse)?;

    let thumbnail = match &request.image {
        Some(bytes) => Some(thumbnail::generate(bytes)?),
        None => None,
    };

    let post_id = PostRepository::new(pool)
        .create(&NewTutorPost {
            user_id: request.user_id,
            course_id,
            details: request.details,
            image: request.image,
            thumbnail,
        })
        .await?;

    info!("User {} created tutor post {}", request.user_id, post_id);
    Ok(post_id)
}

/// A parsed tutor page slug: `{first}-{last}-p{post_id}`.
#[derive(Debug, Clone, PartialEq)]
pub struct TutorSlug {
    pub first_name: String,
    pub last_name: String,
    pub post_id: i64,
}

impl TutorSlug {
    /// Parse a slug of the form `Ada-Lovelace-p7`.
    ///
    /// Returns `None` for anything that does not fit the shape; callers
    /// treat that as not found.
    pub fn parse(slug: &str) -> Option<Self> {
        let (rest, id_part) = slug.rsplit_once("-p")?;
        let post_id: i64 = id_part.parse().ok()?;
        let (first_name, last_name) = rest.split_once('-')?;
        if first_name.is_empty() || last_name.is_empty() {
            return None;
        }
        Some(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            post_id,
        })
    }
}

/// Resolve a slug to an approved post, checking the stored author names
/// against the names in the slug.
pub async fn resolve_slug(pool: &SqlitePool, slug: &str) -> Result<Option<TutorPostDetail>, PostError> {
    let Some(parsed) = TutorSlug::parse(slug) else {
        return Ok(None);
    };

    let detail = PostRepository::new(pool)
        .get_approved_by_id(parsed.post_id)
        .await?;

    Ok(detail.filter(|d| d.first_name == parsed.first_name && d.last_name == parsed.last_name))
}

/// Send a contact message to the author of an approved post.
///
/// Returns `Ok(false)` when the slug does not resolve; the caller renders
/// the page without a confirmation instead of failing.
pub async fn send_contact_message(
    pool: &SqlitePool,
    slug: &str,
    from_user: i64,
    text: &str,
) -> Result<bool, PostError> {
    let Some(detail) = resolve_slug(pool, slug).await? else {
        return Ok(false);
    };

    MessageRepository::new(pool)
        .send(from_user, detail.user_id, text)
        .await?;

    info!(
        "User {} messaged tutor {} via post {}",
        from_user, detail.user_id, detail.post_id
    );
    Ok(true)
}
