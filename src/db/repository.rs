//! User repository for TutorHub.

use sqlx::SqlitePool;

use super::user::{NewUser, User};
use crate::{Result, TutorHubError};

const USER_COLUMNS: &str = "id, email, password_hash, password_salt, first_name, last_name, \
                            major_id, created_at";

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID. A duplicate email
    /// surfaces as a database error carrying the UNIQUE violation.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, password_salt, first_name, last_name, major_id)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.password_salt)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(new_user.major_id)
        .execute(self.pool)
        .await
        .map_err(|e| TutorHubError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| TutorHubError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| TutorHubError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a user by exact email match.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| TutorHubError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Check if an email is already registered.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
                .bind(email)
                .fetch_one(self.pool)
                .await
                .map_err(|e| TutorHubError::Database(e.to_string()))?;
        Ok(exists.0)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await
            .map_err(|e| TutorHubError::Database(e.to_string()))?;
        Ok(count.0)
    }
}
