//! Response DTOs for the web layer.

use serde::Serialize;

use crate::auth::Viewer;
use crate::catalog::{CourseOption, MajorLists};
use crate::db::User;
use crate::search::SearchPage;

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// User information in responses. Never carries credential fields.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Home and search page payload.
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub viewer: Viewer,
    pub categories: MajorLists,
    pub listing: SearchPage,
}

/// Login success payload: where to go next, and who logged in.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// The captured referring page when a lazy registration is pending,
    /// otherwise the home page.
    pub redirect: String,
    pub user: UserInfo,
}

/// Registration form data (majors for the dropdown).
#[derive(Debug, Serialize)]
pub struct RegisterFormResponse {
    pub viewer: Viewer,
    pub majors: MajorLists,
}

/// Registration success payload.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserInfo,
}

/// One dashboard message row.
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub id: i64,
    pub sender_name: String,
    pub body: String,
    pub is_read: bool,
    pub sent_at: String,
}

/// Dashboard payload.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub viewer: Viewer,
    pub messages: Vec<MessageView>,
    pub unread_count: i64,
}

/// Prefill data restored from a captured tutor post draft.
#[derive(Debug, Serialize)]
pub struct PostPrefill {
    pub course_number: String,
    pub major_short_name: String,
    pub post_details: String,
    /// True when the captured draft included an image upload.
    pub image_attached: bool,
}

/// Tutor post creation form payload.
#[derive(Debug, Serialize)]
pub struct CreatePostFormResponse {
    pub viewer: Viewer,
    pub courses: Vec<CourseOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefill: Option<PostPrefill>,
}

/// Tutor post creation success payload.
#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub post_id: i64,
}

/// Tutor detail for the contact page.
#[derive(Debug, Serialize)]
pub struct TutorDetail {
    pub post_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub course_number: String,
    pub course_title: String,
    pub major_short_name: String,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: String,
}

/// Tutor contact page payload.
#[derive(Debug, Serialize)]
pub struct TutorPageResponse {
    pub viewer: Viewer,
    pub tutor: TutorDetail,
    /// Set after a message was sent on this request.
    pub message_sent: bool,
}
