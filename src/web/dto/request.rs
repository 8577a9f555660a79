//! Request DTOs for the web layer.
//!
//! Field names follow the form names the site's pages submit, hence the
//! camelCase renames.

use serde::Deserialize;
use validator::Validate;

fn default_page() -> usize {
    1
}

/// Query parameters for the home and search pages.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text search term.
    #[serde(default)]
    pub search: String,
    /// Category filter (major short name).
    #[serde(default)]
    pub category: String,
    /// 1-indexed page.
    #[serde(default = "default_page")]
    pub page: usize,
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    #[serde(rename = "userEmail")]
    pub user_email: String,
    /// Password.
    #[serde(rename = "enteredPassword")]
    pub entered_password: String,
}

/// User registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, max = 128, message = "must be 8 to 128 characters"))]
    pub password: String,
    /// First name.
    #[validate(length(min = 1, max = 64, message = "is required"))]
    pub first_name: String,
    /// Last name.
    #[validate(length(min = 1, max = 64, message = "is required"))]
    pub last_name: String,
    /// Major short name from the registration dropdown.
    #[validate(length(min = 1, message = "is required"))]
    pub major_dropdown: String,
}

/// Dashboard read-state toggle: comma-separated message ids.
#[derive(Debug, Deserialize)]
pub struct MarkMessagesRequest {
    #[serde(default)]
    pub message_ids: String,
}

/// Message submitted from a tutor's contact form.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactMessageRequest {
    #[serde(rename = "messageText")]
    #[validate(length(min = 1, message = "is required"))]
    pub message_text: String,
}

/// Logged-out message capture for the lazy-registration detour.
#[derive(Debug, Deserialize)]
pub struct ContactLoginRequest {
    /// The tutor page the message was typed on.
    #[serde(rename = "referringTutorPage")]
    pub referring_tutor_page: String,
    #[serde(rename = "messageText")]
    pub message_text: String,
}
