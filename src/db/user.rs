//! User model for TutorHub.

use chrono::NaiveDateTime;

/// User entity representing a registered user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login email (unique).
    pub email: String,
    /// Derived password hash (hex).
    pub password_hash: String,
    /// Per-user random salt (base64).
    pub password_salt: String,
    /// First name, shown in the page header after login.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Major affiliation.
    pub major_id: i64,
    /// Account creation timestamp (UTC).
    pub created_at: NaiveDateTime,
}

impl User {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Data for creating a new user.
///
/// Credential fields must be pre-derived with
/// [`crate::auth::hash_for_registration`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub first_name: String,
    pub last_name: String,
    pub major_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let user = User {
            id: 1,
            email: "a@x.com".to_string(),
            password_hash: "h".to_string(),
            password_salt: "s".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            major_id: 1,
            created_at: chrono::NaiveDateTime::default(),
        };
        assert_eq!(user.full_name(), "Ada Lovelace");
    }
}
